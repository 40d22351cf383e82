use anyhow::Context;
use market_feeds::config::{Credentials, NewsConfig, StreamConfig};
use market_feeds::news::NewsClient;
use market_feeds::stream::StreamClient;
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let (mode, symbol) = parse_args(&args);

    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    match mode.as_str() {
        "prices" => run_prices(&symbol).await?,
        "news" => run_news().await?,
        _ => {
            eprintln!("Invalid mode: {}", mode);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Tail live trade prices for a symbol until Ctrl-C.
async fn run_prices(symbol: &str) -> anyhow::Result<()> {
    let client = StreamClient::new(StreamConfig::from_env());
    let mut prices = client.subscribe();

    client.connect(symbol).await;
    tracing::info!(symbol = %symbol, "Streaming trade prices, Ctrl-C to stop");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                client.disconnect().await;
                break;
            }
            price = prices.recv() => match price {
                Ok(price) => println!("{} {}", symbol, price),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Price receiver lagging, dropped updates");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    Ok(())
}

/// Fetch the latest headlines once and print them.
async fn run_news() -> anyhow::Result<()> {
    let credentials = Credentials::from_env()
        .map_err(anyhow::Error::msg)
        .context("News credentials missing")?;
    let client = NewsClient::new(NewsConfig::from_env(), credentials);

    let articles = client.fetch_latest().await?;
    for article in articles {
        println!(
            "{}  [{}] {}",
            article.published_at.format("%Y-%m-%d %H:%M"),
            article.source.name,
            article.title
        );
    }

    Ok(())
}

/// Parse command-line arguments
fn parse_args(args: &[String]) -> (String, String) {
    let mut mode = "prices".to_string();
    let mut symbol = "btcusdt".to_string();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--prices" => mode = "prices".to_string(),
            "--news" => mode = "news".to_string(),
            "--symbol" => {
                if i + 1 < args.len() {
                    symbol = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    (mode, symbol)
}

/// Print usage information
fn print_usage() {
    println!("market-feeds - live trade prices and news headlines");
    println!();
    println!("USAGE:");
    println!("    market-feeds [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --prices            Stream live trade prices (default)");
    println!("    --news              Fetch the latest headlines once");
    println!("    --symbol <SYMBOL>   Trading pair to stream (default: btcusdt)");
    println!("    --help, -h          Print this help message");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    STREAM_WS_URL               WebSocket base URL (default: wss://stream.binance.com:9443/ws)");
    println!("    STREAM_RECONNECT_DELAY_MS   Reconnect delay (default: 1000)");
    println!("    NEWS_API_URL                News search endpoint (default: https://newsapi.org/v2/everything)");
    println!("    NEWS_API_KEY                News API key (required for --news)");
    println!("    RUST_LOG                    Logging level (default: info)");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args_defaults() {
        let args = vec!["market-feeds".to_string()];
        let (mode, symbol) = parse_args(&args);
        assert_eq!(mode, "prices");
        assert_eq!(symbol, "btcusdt");
    }

    #[test]
    fn test_parse_args_news_mode() {
        let args = vec!["market-feeds".to_string(), "--news".to_string()];
        let (mode, _) = parse_args(&args);
        assert_eq!(mode, "news");
    }

    #[test]
    fn test_parse_args_symbol() {
        let args = vec![
            "market-feeds".to_string(),
            "--symbol".to_string(),
            "ethusdt".to_string(),
        ];
        let (mode, symbol) = parse_args(&args);
        assert_eq!(mode, "prices");
        assert_eq!(symbol, "ethusdt");
    }
}
