use fountaineer::{PipelineError, ScreenplayPipeline, Settings, parse_file};
use std::env;
use std::process;

/// A simple CLI to compile a Fountain script into a formatted PDF.
fn main() -> Result<(), PipelineError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut verbose = false;
    let mut positional = Vec::new();
    for arg in &args[1..] {
        if arg == "--verbose" {
            verbose = true;
        } else {
            positional.push(arg.clone());
        }
    }

    if positional.len() != 3 {
        eprintln!("Compile a Fountain script to a formatted PDF.");
        eprintln!();
        eprintln!(
            "Usage: {} <input.fountain> <output.pdf> <settings.json> [--verbose]",
            args[0]
        );
        eprintln!();
        eprintln!("With --verbose, the parsed blocks and their margins are printed");
        eprintln!("instead of rendering a PDF.");
        process::exit(1);
    }

    let input = &positional[0];
    let output = &positional[1];
    let settings_path = &positional[2];

    let settings = Settings::load(settings_path)?;
    let pipeline = ScreenplayPipeline::new(settings);

    if verbose {
        let blocks = parse_file(input)?;
        println!("\n--- Parsed Blocks ---");
        print!("{}", pipeline.describe_blocks(&blocks));
    } else {
        println!("Compiling {} to {}", input, output);
        pipeline.generate_pdf_file(input, output)?;
        println!("Successfully generated {}", output);
    }

    Ok(())
}
