use anyhow::{Context, Result};

use otolab::marker::derive_markers;
use otolab::oto;
use otolab::text::decode_oto_text;

struct CliConfig {
    input: Option<std::path::PathBuf>,
    duration_ms: Option<f64>,
    write: Option<std::path::PathBuf>,
}

fn parse_args() -> CliConfig {
    let mut cfg = CliConfig {
        input: None,
        duration_ms: None,
        write: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--duration-ms" => {
                if let Some(v) = args.next() {
                    cfg.duration_ms = v.parse::<f64>().ok();
                }
            }
            "--write" => {
                if let Some(p) = args.next() {
                    cfg.write = Some(std::path::PathBuf::from(p));
                }
            }
            _ => {
                if cfg.input.is_none() {
                    cfg.input = Some(std::path::PathBuf::from(arg));
                }
            }
        }
    }
    cfg
}

fn main() -> Result<()> {
    let cfg = parse_args();
    let Some(input) = cfg.input else {
        eprintln!("usage: otolab <oto.ini> [--duration-ms N] [--write OUT]");
        std::process::exit(2);
    };

    let bytes = std::fs::read(&input).with_context(|| format!("read {}", input.display()))?;
    let (text, encoding) = decode_oto_text(&bytes);
    let entries = oto::parse(&text);
    println!(
        "{}: {} entries ({})",
        input.display(),
        entries.len(),
        encoding.label()
    );

    if let Some(total_ms) = cfg.duration_ms {
        for entry in &entries {
            let m = derive_markers(entry, total_ms);
            println!(
                "{:<24} off={:>6.0} ovl={:>6.0} pre={:>6.0} con={:>6.0} cut={:>6.0}",
                entry.alias, m.offset, m.overlap, m.preutter, m.consonant, m.cutoff
            );
        }
    }

    if let Some(out) = cfg.write {
        let normalized = oto::serialize(&entries);
        std::fs::write(&out, normalized).with_context(|| format!("write {}", out.display()))?;
        println!("wrote normalized oto to {}", out.display());
    }

    Ok(())
}
