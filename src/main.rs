#[tokio::main]
async fn main() {
    counseling_backend::run().await;
}
