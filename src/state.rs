use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::admin::AdminService;
use crate::services::auth::{AuthService, Registration};
use crate::services::bargain::BargainService;
use crate::services::catalog::{CatalogService, NewProduct};
use crate::services::credit::CreditSystem;
use crate::services::dice::Dice;
use crate::services::notification::NotificationService;
use crate::services::order::OrderService;
use crate::services::payment::PaymentGateway;
use crate::services::recommend::RecommendationEngine;
use crate::services::review::ReviewService;
use crate::store::Store;

const DEMO_MERCHANT_PHONE: &str = "13800000002";

/// Everything a request handler needs. Cloning is cheap: services share one store.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<Store>,
    pub auth: AuthService,
    pub catalog: CatalogService,
    pub orders: OrderService,
    pub payments: PaymentGateway,
    pub bargains: BargainService,
    pub reviews: ReviewService,
    pub notifications: NotificationService,
    pub recommend: Arc<RecommendationEngine>,
    pub credit: Arc<CreditSystem>,
    pub admin: AdminService,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let dice = Arc::new(Dice::from_seed_opt(config.rng_seed));
        Self::with_dice(config, dice)
    }

    pub fn with_dice(config: AppConfig, dice: Arc<Dice>) -> Self {
        let store = Arc::new(Store::new());
        let notifications = NotificationService::new(store.clone());
        let recommend = Arc::new(RecommendationEngine::new(store.clone()));
        let credit = Arc::new(CreditSystem::new());
        let payments = PaymentGateway::new(store.clone(), notifications.clone(), dice.clone());

        AppState {
            config: Arc::new(config),
            auth: AuthService::new(store.clone()),
            catalog: CatalogService::new(store.clone()),
            orders: OrderService::new(
                store.clone(),
                payments.clone(),
                credit.clone(),
                recommend.clone(),
            ),
            payments,
            bargains: BargainService::new(store.clone(), notifications.clone(), dice),
            reviews: ReviewService::new(store.clone()),
            admin: AdminService::new(store.clone()),
            notifications,
            recommend,
            credit,
            store,
        }
    }

    /// Register the configured admin account (if absent) and, when enabled,
    /// a demo merchant with two listings.
    pub fn bootstrap(&self) -> Result<()> {
        let cfg = &self.config;
        if self.store.get_user_by_phone(&cfg.admin_phone).is_none() {
            let extra = Registration {
                name: Some("Admin".to_string()),
                shop_name: None,
            };
            self.auth
                .register_with(&cfg.admin_phone, &cfg.admin_password, "admin", extra)?;
            info!(phone = %cfg.admin_phone, "bootstrap admin registered");
        } else {
            info!("admin account already exists");
        }

        if cfg.seed_demo_data {
            self.seed_demo_data()?;
        }
        Ok(())
    }

    fn seed_demo_data(&self) -> Result<()> {
        let merchant = match self.store.get_user_by_phone(DEMO_MERCHANT_PHONE) {
            Some(m) => m,
            None => self.auth.register_with(
                DEMO_MERCHANT_PHONE,
                "bobpwd",
                "merchant",
                Registration {
                    name: Some("Bob".to_string()),
                    shop_name: Some("BobShop".to_string()),
                },
            )?,
        };

        if self.store.counts().products == 0 {
            self.catalog.create_product(
                NewProduct::new(&merchant.id, "Vintage Lamp", 1999, 3)
                    .description("A warm lamp.")
                    .tags(["lamp"]),
            )?;
            self.catalog.create_product(
                NewProduct::new(&merchant.id, "Used Phone", 8999, 5)
                    .description("Good condition.")
                    .tags(["phone"]),
            )?;
            info!(merchant_id = %merchant.id, "demo catalog seeded");
        }
        Ok(())
    }
}
