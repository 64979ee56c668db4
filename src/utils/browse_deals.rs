use clap::Parser;
use topaz_backend::{api::ItadApi, documents::DealItem, util, Tracing};

/// Browse current game deals from IsThereAnyDeal.
#[derive(Parser)]
struct Opts {
    /// JSON file that contains application keys.
    #[clap(long, default_value = "keys.json")]
    key_store: String,

    #[clap(long, default_value = "0")]
    offset: u64,

    #[clap(long, default_value = "20")]
    limit: u64,

    /// List shops tracked by IsThereAnyDeal instead of deals.
    #[clap(long)]
    shops: bool,

    /// List the most waitlisted games instead of deals.
    #[clap(long)]
    waitlisted: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    Tracing::setup("utils/browse_deals")?;

    let opts: Opts = Opts::parse();
    let keys = util::keys::Keys::from_file(&opts.key_store)?;
    let itad = ItadApi::new(&keys.itad.api_key, &keys.itad.country);

    if opts.shops {
        for shop in itad.shops().await? {
            println!("{:>4} {} -- {} deals", shop.id, shop.title, shop.deals);
        }
        return Ok(());
    }

    if opts.waitlisted {
        for stat in itad.most_waitlisted(opts.offset, opts.limit).await? {
            println!("{} -- {} users", stat.title, stat.count);
        }
        return Ok(());
    }

    let response = itad.deals(opts.offset, opts.limit).await?;
    for (i, item) in response.list.iter().enumerate() {
        println!("#{} {}", opts.offset as usize + i, describe(item));
    }
    if response.has_more {
        println!("more deals at --offset {}", response.next_offset);
    }

    Ok(())
}

fn describe(item: &DealItem) -> String {
    match &item.deal {
        Some(deal) => format!(
            "{} -- {} {:.2} (-{}%, regular {:.2}) at {}",
            item.title,
            deal.price.currency,
            deal.price.amount,
            deal.cut,
            deal.regular.amount,
            deal.shop.name,
        ),
        None => format!("{} -- no deal", item.title),
    }
}
