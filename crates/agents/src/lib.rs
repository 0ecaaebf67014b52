use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rihla_catalog::Catalog;
use rihla_core::{
    assemble, select_candidates, Itinerary, ParsedQuery, PlanError, QueryParser, TripRequest,
};
use rihla_narrative::{Narrator, TemplateNarrator};
use rihla_observability::AppMetrics;
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// One fully built plan: the echo of what was understood plus the
/// structured day-by-day itinerary.
#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub plan_id: String,
    pub parsed: ParsedQuery,
    pub request: TripRequest,
    pub itinerary: Itinerary,
}

#[derive(Clone)]
pub struct PlannerAgent<P> {
    parser: P,
    catalog: Arc<Catalog>,
    narrator: Arc<Narrator>,
    metrics: Arc<AppMetrics>,
    seed: Option<u64>,
}

impl<P> PlannerAgent<P>
where
    P: QueryParser,
{
    pub fn new(
        parser: P,
        catalog: Arc<Catalog>,
        narrator: Arc<Narrator>,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            parser,
            catalog,
            narrator,
            metrics,
            seed: None,
        }
    }

    /// Pins the shuffle order. Meant for tests and reproducible CLI runs;
    /// production traffic keeps the seedless default.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[instrument(skip(self, query))]
    pub fn plan(&self, query: &str) -> Result<TripPlan, PlanError> {
        let started = Instant::now();
        self.metrics.inc_request();

        match self.build_plan(query) {
            Ok(plan) => {
                self.metrics.inc_plan_built();
                self.metrics.observe_latency(started.elapsed());
                info!(
                    plan_id = %plan.plan_id,
                    city = %plan.request.city.name(),
                    days = plan.request.days,
                    "plan built"
                );
                Ok(plan)
            }
            Err(err) => {
                self.metrics.inc_plan_failure();
                self.metrics.observe_latency(started.elapsed());
                warn!(code = err.code(), error = %err, "plan rejected");
                Err(err)
            }
        }
    }

    /// Never fails: a narrative model error degrades to the offline
    /// template instead of taking the plan down with it.
    #[instrument(skip(self, plan))]
    pub async fn narrate(&self, plan: &TripPlan) -> String {
        self.metrics.inc_narrative_call();
        if self.narrator.kind() == "template" {
            self.metrics.inc_narrative_fallback();
        }

        match self.narrator.narrate(&plan.request, &plan.itinerary).await {
            Ok(prose) => prose,
            Err(err) => {
                warn!(error = %err, "narrative model failed, using template");
                self.metrics.inc_narrative_fallback();
                TemplateNarrator.generate(&plan.request, &plan.itinerary)
            }
        }
    }

    fn build_plan(&self, query: &str) -> Result<TripPlan, PlanError> {
        let parsed = self.parser.parse(query);
        let request = parsed.clone().into_request()?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let candidates = select_candidates(
            &self.catalog.attractions,
            &self.catalog.hotels,
            &self.catalog.restaurants,
            &request,
            &mut rng,
        )?;
        let itinerary = assemble(&request, &candidates)?;

        Ok(TripPlan {
            plan_id: Uuid::new_v4().to_string(),
            parsed,
            request,
            itinerary,
        })
    }
}
