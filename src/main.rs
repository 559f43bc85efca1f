use clap::Parser;
use imma_segmenter::cli::{Args, setup_logging};
use imma_segmenter::processor::SegmentProcessor;
use std::process;

fn main() {
    // Missing arguments print usage and exit here
    let args = Args::parse();

    setup_logging(&args);

    let config = match args.build_config() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let mut processor =
            SegmentProcessor::new(args.input_dir, args.output_dir)?.with_config(config);
        processor.process().await
    });

    match result {
        Ok(_stats) => {
            // Summary has already been printed by the processor
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}
