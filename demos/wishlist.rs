use dotenvy::dotenv;
use wishlist_store::{
    Category, FallbackStore, GiftDraft, GiftPatch, GiftStore, Priority, SupabaseStoreOptions,
};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Uses SUPABASE_URL / SUPABASE_ANON_KEY when set; otherwise every call
    // lands in the local JSON document.
    let store = FallbackStore::supabase_with_local(
        SupabaseStoreOptions::from_env(),
        std::env::temp_dir().join("wishlist.json"),
    );

    let draft = GiftDraft {
        name: "Bolsa rosa".to_string(),
        price: "150,00".to_string(),
        category: Category::Moda,
        priority: Priority::Sonho,
        ..Default::default()
    };
    draft.validate().unwrap();

    let gift = store.create(draft).await.unwrap();
    println!("created: {gift:#?}");

    let gift = store
        .update(
            &gift.id,
            GiftPatch {
                received: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    println!("received: {gift:#?}");

    for gift in store.list().await.unwrap() {
        println!("- {} ({}) [{:?}]", gift.name, gift.price, gift.priority);
    }

    store.delete(&gift.id).await.unwrap();
    println!("deleted {}", gift.id);
}
