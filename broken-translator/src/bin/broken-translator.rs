use broken_translator::logging;
use broken_translator::{Chain, ChainRun, ChainRunner, MockTranslator, TranslatorConfig};
use clap::{Arg, ArgAction, Command};
use serde_json::json;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("broken-translator")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run text through a chain of machine translations and see how broken it comes back")
        .arg(
            Arg::new("text")
                .help("Text to send through the chain")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use the mock translator even if an API key is configured")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("chain")
                .long("chain")
                .short('c')
                .help("Comma-separated language codes, e.g. ko,fi,ar,ja,ko")
                .value_delimiter(','),
        )
        .arg(
            Arg::new("delay-ms")
                .long("delay-ms")
                .help("Simulated delay per mocked hop, in milliseconds")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the run and comparison as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every hop")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    dotenvy::dotenv().ok();
    let mut config = TranslatorConfig::load()?;

    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        config.log_level.as_str()
    };
    logging::init(level, config.log_format);

    if let Some(delay) = matches.get_one::<u64>("delay-ms") {
        config.mock_delay_ms = *delay;
    }

    let text = matches
        .get_one::<String>("text")
        .map(|s| s.trim())
        .unwrap_or_default();
    if text.is_empty() {
        return Err("nothing to translate: the text is empty".into());
    }

    let mut runner = if matches.get_flag("mock") {
        ChainRunner::new(
            config.build_chain()?,
            Arc::new(MockTranslator::with_delay(config.mock_delay_ms)),
        )
    } else {
        ChainRunner::from_config(&config)?
    };

    if let Some(codes) = matches.get_many::<String>("chain") {
        runner = runner.with_chain(Chain::from_codes(codes)?);
    }

    let run = runner.run(text).await?;

    if matches.get_flag("json") {
        let output = json!({ "run": &run, "comparison": run.comparison() });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_run(&run);
    }

    Ok(())
}

fn print_run(run: &ChainRun) {
    if run.used_mock {
        println!("🤖 Mock translations: no live API was called");
        println!();
    }

    for result in &run.results {
        let marker = if result.is_original {
            " (original)"
        } else if result.is_final {
            " (final)"
        } else {
            ""
        };
        println!(
            "[{}] {} {}{}",
            result.step,
            result.language.flag(),
            result.language.display_name,
            marker
        );
        println!("    {}", result.text);
    }

    let comparison = run.comparison();
    println!();
    println!("🔍 Similarity: {:.0}%", comparison.similarity);
    println!("🔥 Brokenness: {:.0}%", comparison.brokenness);
    println!("   {}", comparison.message());
}
