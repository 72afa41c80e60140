mod models;
mod schema;

use async_graphql::http::GraphQLPlaygroundConfig;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::serve;
use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
};
use bridge_history_orm::{DataBase, DbConfig};
use schema::{AppSchema, build_schema};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let db_config = DbConfig::from_env()?;

    let port_number = std::env::var("PORT")
        .unwrap_or("8000".to_string())
        .parse::<u16>()
        .map_err(|e| anyhow::anyhow!("PORT must be a u16 number: {e}"))?;
    if port_number == 0 {
        anyhow::bail!("PORT must be a positive number");
    }

    let db = DataBase::new(&db_config).await?;
    let schema = build_schema(db.bridge_batch_orm());

    let app = Router::new()
        .route("/", get(graphql_playground))
        .route("/graphql", get(graphql_handler).post(graphql_handler))
        .with_state(schema);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port_number));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("GraphQL server started at {}", addr);

    serve(listener, app).await?;

    Ok(())
}

async fn graphql_handler(State(schema): State<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphql_playground() -> impl IntoResponse {
    Html(async_graphql::http::playground_source(
        GraphQLPlaygroundConfig::new("/graphql"),
    ))
}
