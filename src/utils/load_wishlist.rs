use std::sync::Arc;

use clap::Parser;
use topaz_backend::{
    api::{FirestoreApi, ItadApi},
    library::{AuthEvent, DealAggregator, Identity, ImageSlots, LoadOutcome, WishlistSession},
    traits::DealSource,
    util, Tracing,
};
use tracing::{info, warn};

/// Page through a user's wishlist and print each game's cheapest deal.
#[derive(Parser)]
struct Opts {
    /// JSON file that contains application keys.
    #[clap(long, default_value = "keys.json")]
    key_store: String,

    #[clap(long)]
    user: String,

    /// Maximum number of pages to load.
    #[clap(long, default_value = "5")]
    pages: usize,

    /// Also download the poster of each item.
    #[clap(long)]
    posters: bool,

    #[clap(long)]
    prod_tracing: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let opts: Opts = Opts::parse();
    let keys = util::keys::Keys::from_file(&opts.key_store)?;

    match opts.prod_tracing {
        false => Tracing::setup("utils/load_wishlist")?,
        true => Tracing::setup_prod(&keys.firestore.project_id)?,
    }

    let firestore = Arc::new(FirestoreApi::connect(&keys.firestore.project_id).await?);
    let itad = Arc::new(ItadApi::new(&keys.itad.api_key, &keys.itad.country));

    let mut session = WishlistSession::new(
        firestore,
        DealAggregator::new(Arc::clone(&itad) as Arc<dyn DealSource>),
    );
    session.on_auth(AuthEvent::SignedIn(Identity::new(&opts.user)));

    for _ in 0..opts.pages {
        match session.load_next_page().await {
            Ok(LoadOutcome::Appended { added, exhausted }) => {
                info!("loaded {added} items");
                if exhausted {
                    break;
                }
            }
            Ok(outcome) => {
                warn!("stopped loading: {outcome:?}");
                break;
            }
            Err(skipped) => {
                warn!("load skipped: {skipped:?}");
                break;
            }
        }
    }

    for (i, item) in session.items().iter().enumerate() {
        println!(
            "#{i} {} -- {} {:.2} (-{}%) at {}",
            item.title,
            item.deal.price.currency,
            item.deal.price.amount,
            item.deal.cut,
            item.deal.shop.name,
        );
    }

    if opts.posters {
        let mut slots = ImageSlots::new();
        for (slot, item) in session.items().iter().enumerate() {
            let Some(url) = item.poster_url.clone() else {
                continue;
            };
            let itad = Arc::clone(&itad);
            let title = item.title.clone();
            slots.assign(slot, async move {
                match itad.image(&url).await {
                    Ok(bytes) => println!("poster for {title}: {} bytes", bytes.len()),
                    Err(status) => warn!("poster for {title}: {status}"),
                }
            });
        }
        slots.join().await;
    }

    Ok(())
}
