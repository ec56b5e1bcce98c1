//! pngsplice — inspect and patch PNG chunk streams
//!
//! # Usage
//!
//! ```text
//! pngsplice report <file> [--suppress]                       List chunks
//! pngsplice insert <file> <offset> <type> <payload> -o <out> Insert a chunk
//! pngsplice encode <file> <offset> <type> <payload> -k <key> -o <out>
//!                                                            Insert XOR-ciphered
//! pngsplice decode <file> <offset> -k <key> -o <out>         XOR existing chunk
//! ```
//!
//! Offsets are accepted in decimal or `0x`-prefixed hex; reports print them
//! in hex so they can be fed straight back to `decode`. Chunk types must be
//! exactly 4 bytes (e.g. `teSt`).

use png_splice::{xor_transform, Error, PngStream, Result};
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "report" => cmd_report(&args[2..]),
        "insert" => cmd_insert(&args[2..], false),
        "encode" => cmd_insert(&args[2..], true),
        "decode" => cmd_decode(&args[2..]),
        "-h" | "--help" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  pngsplice report <file> [--suppress]");
    eprintln!("  pngsplice insert <file> <offset> <type> <payload> -o <out>");
    eprintln!("  pngsplice encode <file> <offset> <type> <payload> -k <key> -o <out>");
    eprintln!("  pngsplice decode <file> <offset> -k <key> -o <out>");
}

fn cmd_report(args: &[String]) -> Result<()> {
    let (file, rest) = split_first(args, "report <file> [--suppress]")?;
    let suppress = rest.iter().any(|a| a == "--suppress");

    let data = fs::read(file)?;
    let png = PngStream::new(&data)?;

    for record in png.chunks() {
        let record = record?;
        println!("---- Chunk # {} ----", record.index);
        println!("Chunk Offset: {:#02x}", record.offset);
        println!("Chunk Length: {} bytes", record.chunk.length());
        println!("Chunk Type: {}", record.chunk.type_str());
        println!("Chunk Importance: {}", record.chunk.criticality());
        if suppress {
            println!("Chunk Data: Suppressed");
        } else {
            println!("Chunk Data: {}", hex(record.chunk.data()));
        }
        println!("Chunk CRC: {:x}", record.chunk.crc());
    }
    Ok(())
}

fn cmd_insert(args: &[String], ciphered: bool) -> Result<()> {
    let usage = if ciphered {
        "encode <file> <offset> <type> <payload> -k <key> -o <out>"
    } else {
        "insert <file> <offset> <type> <payload> -o <out>"
    };
    if args.len() < 4 {
        return Err(usage_error(usage));
    }
    let offset = parse_offset(&args[1])?;
    let chunk_type = parse_type(&args[2])?;
    let payload = args[3].as_bytes();
    let out_path = flag_value(&args[4..], "-o").ok_or_else(|| usage_error(usage))?;

    let data = fs::read(&args[0])?;
    let png = PngStream::new(&data)?;

    let patched = if ciphered {
        let key = flag_value(&args[4..], "-k").ok_or_else(|| usage_error(usage))?;
        let obscured = xor_transform(payload, key.as_bytes())?;
        println!("Payload Original: {}", hex(payload));
        println!("Payload Encode: {}", hex(&obscured));
        png.insert_ciphered(offset, chunk_type, payload, key.as_bytes())?
    } else {
        println!("Payload: {}", hex(payload));
        png.insert_chunk(offset, chunk_type, payload)?
    };

    fs::write(out_path, patched)?;
    println!("Success: {out_path} created");
    Ok(())
}

fn cmd_decode(args: &[String]) -> Result<()> {
    let usage = "decode <file> <offset> -k <key> -o <out>";
    if args.len() < 2 {
        return Err(usage_error(usage));
    }
    let offset = parse_offset(&args[1])?;
    let key = flag_value(&args[2..], "-k").ok_or_else(|| usage_error(usage))?;
    let out_path = flag_value(&args[2..], "-o").ok_or_else(|| usage_error(usage))?;

    let data = fs::read(&args[0])?;
    let png = PngStream::new(&data)?;

    // Echo what the chunk held and what it becomes
    let mut cursor = png_splice::ByteCursor::new(&data);
    cursor.seek_to(offset)?;
    let existing = png_splice::Chunk::decode(&mut cursor)?;
    let revealed = xor_transform(existing.data(), key.as_bytes())?;
    println!("Payload Original: {}", hex(existing.data()));
    println!("Payload Decode: {}", hex(&revealed));

    let patched = png.replace_ciphered(offset, key.as_bytes())?;
    fs::write(out_path, patched)?;
    println!("Success: {out_path} created");
    Ok(())
}

fn split_first<'a>(args: &'a [String], usage: &str) -> Result<(&'a String, &'a [String])> {
    args.split_first().ok_or_else(|| usage_error(usage))
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
}

fn parse_offset(arg: &str) -> Result<u64> {
    let parsed = match arg.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => arg.parse(),
    };
    parsed.map_err(|_| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid offset: {arg}"),
        ))
    })
}

fn parse_type(arg: &str) -> Result<[u8; 4]> {
    <[u8; 4]>::try_from(arg.as_bytes()).map_err(|_| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("chunk type must be exactly 4 bytes: {arg}"),
        ))
    })
}

fn usage_error(usage: &str) -> Error {
    Error::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        format!("usage: pngsplice {usage}"),
    ))
}

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{byte:02X}"));
    }
    out
}
