// Engine — the shared recommendation state wired over one database.
//
// One engine instance serves all requests: the taxonomy and click model
// are process-wide shared state, owned here explicitly rather than hiding
// in globals. Refitting the click model is an atomic whole-value swap
// behind the RwLock, so concurrent rankers never observe a half-updated
// model.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::db::Database;
use crate::engagement::EngagementStore;
use crate::ranking::ranker::Ranker;
use crate::scoring::ctr::ClickModel;
use crate::scoring::relevance::RelevanceWeights;
use crate::topics::assigner::KeywordAssigner;
use crate::topics::taxonomy::Taxonomy;

/// model_state key holding the click model's scalar.
pub const CLICK_RATE_KEY: &str = "click_rate";
/// model_state key holding the taxonomy JSON.
pub const TAXONOMY_KEY: &str = "taxonomy";

pub struct Engine {
    pub taxonomy: Arc<Taxonomy>,
    pub click: Arc<RwLock<ClickModel>>,
    pub store: EngagementStore,
    pub weights: RelevanceWeights,
    db: Arc<dyn Database>,
}

impl Engine {
    /// Load persisted models from the database, falling back to built-in
    /// defaults when a value is absent. Absence is a normal first-run
    /// state, not an error; only unreadable stored values propagate.
    pub async fn load(db: Arc<dyn Database>) -> Result<Self> {
        let taxonomy = match db.get_model_state(TAXONOMY_KEY).await? {
            Some(json) => {
                let taxonomy: Taxonomy =
                    serde_json::from_str(&json).context("Failed to parse stored taxonomy")?;
                debug!(topics = taxonomy.len(), "loaded persisted taxonomy");
                taxonomy
            }
            None => {
                info!("no persisted taxonomy, using built-in default");
                Taxonomy::default()
            }
        };

        let click = match db.get_model_state(CLICK_RATE_KEY).await? {
            Some(value) => {
                let rate: f64 = value
                    .parse()
                    .with_context(|| format!("Invalid stored click rate: {value}"))?;
                debug!(rate, "loaded persisted click model");
                ClickModel::from_rate(rate)
            }
            None => {
                info!("no persisted click model, using default rate");
                ClickModel::default()
            }
        };

        Ok(Self {
            taxonomy: Arc::new(taxonomy),
            click: Arc::new(RwLock::new(click)),
            store: EngagementStore::new(db.clone()),
            weights: RelevanceWeights::default(),
            db,
        })
    }

    /// The keyword assigner bound to this engine's taxonomy.
    pub fn assigner(&self) -> KeywordAssigner {
        KeywordAssigner::new(self.taxonomy.clone())
    }

    /// Construct a ranker sharing this engine's state.
    pub fn ranker(&self) -> Ranker {
        Ranker::new(
            self.assigner(),
            self.click.clone(),
            self.store.clone(),
            self.weights,
        )
    }

    /// Refit the click model from all stored interactions and persist the
    /// new scalar. Returns (old rate, new rate).
    pub async fn refit(&self) -> Result<(f64, f64)> {
        // The text side of the training set is unused by the scalar model;
        // it exists for the predictive model this one stands in for.
        let (_texts, labels) = self.store.training_data().await?;
        let fitted = ClickModel::fit(&labels);

        let old_rate = {
            let mut model = self.click.write().await;
            let old = model.rate();
            *model = fitted;
            old
        };

        self.db
            .set_model_state(CLICK_RATE_KEY, &fitted.rate().to_string())
            .await?;

        info!(
            samples = labels.len(),
            old_rate,
            new_rate = fitted.rate(),
            "refit click model"
        );

        Ok((old_rate, fitted.rate()))
    }

    /// Write the current taxonomy and click rate to model_state, so both
    /// survive restarts and can be inspected or edited in the database.
    pub async fn persist_models(&self) -> Result<()> {
        let taxonomy_json = serde_json::to_string(self.taxonomy.as_ref())?;
        self.db
            .set_model_state(TAXONOMY_KEY, &taxonomy_json)
            .await?;

        let rate = self.click.read().await.rate();
        self.db
            .set_model_state(CLICK_RATE_KEY, &rate.to_string())
            .await?;

        Ok(())
    }
}
