//! snap – command-line HTML → single-page raster PDF converter.
//!
//! Usage:
//!   snap                                  (built-in sample, writes output.pdf)
//!   snap <input.html> <output.pdf>
//!
//! Exit codes: 0 success, 1 unreadable input, 2 render failure, 3 PDF
//! assembly failure, 4 serialization failure.

use std::{env, fs, path::PathBuf, process, time::Duration};

use pdf_snap::pipeline::{run, CompletionSignal, ConversionRequest, ConvertConfig};
use pdf_snap::templates;
use pdf_snap::ChromeRenderer;

const DEFAULT_OUTPUT_PATH: &str = "output.pdf";

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut title: Option<String> = None;
    let mut repaint_delay_ms: Option<u64> = None;
    let mut settle_delay_ms: Option<u64> = None;
    let mut debug_snapshots = false;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1).peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--title" | "-t" => match iter.next() {
                Some(v) => title = Some(v.clone()),
                None => {
                    eprintln!("--title requires a value");
                    process::exit(1);
                }
            },
            "--repaint-delay-ms" => repaint_delay_ms = Some(parse_ms(arg, iter.next())),
            "--settle-delay-ms" => settle_delay_ms = Some(parse_ms(arg, iter.next())),
            "--debug-snapshots" => debug_snapshots = true,
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if positional == 0 {
                    input_path = Some(PathBuf::from(path));
                } else if positional == 1 {
                    output_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                positional += 1;
            }
        }
    }

    // Zero positional arguments means the built-in sample; two mean a real
    // input/output pair. One of the two alone is a usage error.
    let (html, output) = match (input_path, output_path) {
        (None, None) => (
            templates::sample_document().to_string(),
            PathBuf::from(DEFAULT_OUTPUT_PATH),
        ),
        (Some(input), Some(output)) => {
            let html = match fs::read_to_string(&input) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Failed to open HTML file '{}': {e}", input.display());
                    process::exit(1);
                }
            };
            if title.is_none() {
                // Default title: stem of the input filename.
                title = input
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .map(|s| s.to_string());
            }
            (html, output)
        }
        _ => {
            eprintln!("Error: expected both <input.html> and <output.pdf>, or neither.");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let defaults = ConvertConfig::default();
    let config = ConvertConfig {
        title: title.unwrap_or(defaults.title),
        repaint_delay: repaint_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.repaint_delay),
        settle_delay: settle_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.settle_delay),
        debug_snapshots,
    };

    let mut renderer = match ChromeRenderer::launch() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to start the rendering engine: {e}");
            process::exit(2);
        }
    };

    let request = ConversionRequest { html, output };
    let done = CompletionSignal::new();

    let code = match run(&mut renderer, &request, &config, &done) {
        Ok(()) => {
            eprintln!("Wrote '{}'", request.output.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    };

    renderer.close();
    process::exit(code);
}

fn parse_ms(flag: &str, value: Option<&String>) -> u64 {
    match value.and_then(|v| v.parse().ok()) {
        Some(ms) => ms,
        None => {
            eprintln!("{flag} requires a millisecond value");
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("snap – HTML to single-page raster PDF converter (pdf-snap)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} [<input.html> <output.pdf>] [flags]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <input.html>   HTML file to convert (omit both to render a built-in sample)");
    eprintln!("  <output.pdf>   Output path  (default: {DEFAULT_OUTPUT_PATH})");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --title, -t           Document title in PDF metadata (default: input filename stem)");
    eprintln!("  --repaint-delay-ms    Wait before the repaint request (default: 1000)");
    eprintln!("  --settle-delay-ms     Wait before the capture (default: 10000)");
    eprintln!("  --debug-snapshots     Write PNG snapshots of the raster at both pipeline stages");
    eprintln!("  --help                Print this message");
}
