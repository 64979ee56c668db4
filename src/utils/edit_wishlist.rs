use clap::Parser;
use topaz_backend::{
    api::FirestoreApi,
    library::{firestore::wishlist, Identity},
    util, Status, Tracing,
};

/// Add or remove a game from a user's wishlist.
#[derive(Parser)]
struct Opts {
    /// JSON file that contains application keys.
    #[clap(long, default_value = "keys.json")]
    key_store: String,

    #[clap(long)]
    user: String,

    /// ITAD id of the game to add.
    #[clap(long)]
    add: Option<String>,

    /// ITAD id of the game to remove.
    #[clap(long)]
    remove: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Status> {
    Tracing::setup("utils/edit_wishlist")?;

    let opts: Opts = Opts::parse();
    let keys = util::keys::Keys::from_file(&opts.key_store)?;
    let firestore = FirestoreApi::connect(&keys.firestore.project_id).await?;
    let identity = Identity::new(&opts.user);

    match (opts.add, opts.remove) {
        (Some(game_id), None) => {
            let reference = wishlist::add_entry(&firestore, &identity, &game_id).await?;
            println!("added {} at {}", reference.game_id, reference.created_at);
        }
        (None, Some(game_id)) => {
            wishlist::remove_entry(&firestore, &identity, &game_id).await?;
            println!("removed {game_id}");
        }
        _ => {
            return Err(Status::invalid_argument(
                "exactly one of --add or --remove is required",
            ))
        }
    }

    Ok(())
}
