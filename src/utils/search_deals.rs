use clap::Parser;
use topaz_backend::{api::ItadApi, util, Tracing};
use tracing::warn;

/// Search games by title and show their cheapest current deal.
#[derive(Parser)]
struct Opts {
    /// JSON file that contains application keys.
    #[clap(long, default_value = "keys.json")]
    key_store: String,

    /// Game title to search for.
    #[clap(short, long)]
    title: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    Tracing::setup("utils/search_deals")?;

    let opts: Opts = Opts::parse();
    let keys = util::keys::Keys::from_file(&opts.key_store)?;
    let itad = ItadApi::new(&keys.itad.api_key, &keys.itad.country);

    let candidates = itad.search(&opts.title).await?;
    println!("Found {} candidates.", candidates.len());
    if candidates.is_empty() {
        return Ok(());
    }

    let ids = candidates.iter().map(|c| c.id.clone()).collect::<Vec<_>>();
    let prices = match itad.prices(&ids).await {
        Ok(prices) => prices,
        Err(status) => {
            warn!("{status}");
            vec![]
        }
    };

    for candidate in &candidates {
        let cheapest = prices
            .iter()
            .find(|p| p.id == candidate.id)
            .and_then(|p| p.cheapest_deal());
        match cheapest {
            Some(deal) => println!(
                "{} -- {} {:.2} at {}",
                candidate.title, deal.price.currency, deal.price.amount, deal.shop.name
            ),
            None => println!("{} -- no current deal", candidate.title),
        }
    }

    Ok(())
}
