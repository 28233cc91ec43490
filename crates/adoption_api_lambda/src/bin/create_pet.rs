use adoption_api_core::record::CollectionKind;
use adoption_api_lambda::runtime::{serve, Endpoint};
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    serve(Endpoint::Create(CollectionKind::Pets)).await
}
