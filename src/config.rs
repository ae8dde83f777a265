// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{InventoryStore, PgInventoryStore},
    services::{
        CategoryService, MovementService, ProductService, ReportService, StockAlerts,
        TracingStockAlerts,
    },
};

// O estado compartilhado que será acessível em toda a aplicação.
#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
    pub category_service: CategoryService,
    pub movement_service: MovementService,
    pub report_service: ReportService,
}

impl AppState {
    /// Monta o estado de produção: pool Postgres + migrações + serviços.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        sqlx::migrate!().run(&db_pool).await?;
        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

        let store: Arc<dyn InventoryStore> = Arc::new(PgInventoryStore::new(db_pool));
        let alerts: Arc<dyn StockAlerts> = Arc::new(TracingStockAlerts);
        Ok(Self::with_store(store, alerts))
    }

    /// Monta o grafo de dependências sobre qualquer backend de
    /// armazenamento. Os testes usam este construtor com o backend em
    /// memória.
    pub fn with_store(store: Arc<dyn InventoryStore>, alerts: Arc<dyn StockAlerts>) -> Self {
        Self {
            product_service: ProductService::new(store.clone()),
            category_service: CategoryService::new(store.clone()),
            movement_service: MovementService::new(store.clone(), alerts),
            report_service: ReportService::new(store),
        }
    }
}
