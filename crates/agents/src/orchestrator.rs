use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use advisor_core::{AgentKind, AgentOutput, DetailLevel, TravelerProfile};
use advisor_observability::AppMetrics;
use advisor_search::QueryService;
use tracing::{info, instrument, warn};

use crate::currency::{extract_currency_code, DEFAULT_CURRENCY};
use crate::{default_agents, Agent, Finish, QueryPlan};

pub const SERVICE_ERROR_PREFIX: &str = "Search service error: ";

/// Routes a request-type name to its agent and runs the agent's plan
/// against the injected query service.
pub struct Orchestrator<Q>
where
    Q: QueryService,
{
    service: Arc<Q>,
    agents: HashMap<AgentKind, Box<dyn Agent>>,
    metrics: Arc<AppMetrics>,
}

impl<Q> Orchestrator<Q>
where
    Q: QueryService,
{
    pub fn new(service: Arc<Q>, metrics: Arc<AppMetrics>) -> Self {
        let mut orchestrator = Self {
            service,
            agents: HashMap::new(),
            metrics,
        };
        for agent in default_agents() {
            orchestrator.register(agent);
        }
        orchestrator
    }

    /// Replaces whichever agent currently serves `agent.kind()`.
    pub fn register(&mut self, agent: Box<dyn Agent>) {
        self.agents.insert(agent.kind(), agent);
    }

    pub fn with_agent(mut self, agent: impl Agent + 'static) -> Self {
        self.register(Box::new(agent));
        self
    }

    pub fn service(&self) -> &Q {
        &self.service
    }

    pub fn kinds(&self) -> Vec<AgentKind> {
        AgentKind::ALL
            .into_iter()
            .filter(|kind| self.agents.contains_key(kind))
            .collect()
    }

    pub fn is_registered(&self, request_type: &str) -> bool {
        AgentKind::parse(request_type).is_ok_and(|kind| self.agents.contains_key(&kind))
    }

    pub fn preview(&self, kind: AgentKind, profile: &TravelerProfile) -> Option<QueryPlan> {
        self.agents.get(&kind).map(|agent| agent.plan(profile))
    }

    /// Never fails: unknown names and service errors come back as text.
    #[instrument(skip(self, profile))]
    pub async fn handle(&self, request_type: &str, profile: &TravelerProfile) -> AgentOutput {
        self.metrics.inc_request();

        match AgentKind::parse(request_type) {
            Ok(kind) if self.agents.contains_key(&kind) => self.run(kind, profile).await,
            _ => {
                self.metrics.inc_unknown_agent();
                warn!(request_type, "no agent registered");
                AgentOutput::Text(format!("No agent found for request type: {request_type}"))
            }
        }
    }

    pub async fn dispatch(&self, kind: AgentKind, profile: &TravelerProfile) -> AgentOutput {
        self.metrics.inc_request();
        if !self.agents.contains_key(&kind) {
            self.metrics.inc_unknown_agent();
            return AgentOutput::Text(format!("No agent found for request type: {kind}"));
        }
        self.run(kind, profile).await
    }

    /// Free-text question straight to the query service.
    pub async fn chat(&self, text: &str) -> String {
        self.metrics.inc_request();
        let started = Instant::now();
        let result = self.service.search(text, DetailLevel::Detailed).await;
        self.metrics.observe_latency(started.elapsed());

        match result {
            Ok(answer) => answer,
            Err(error) => {
                self.metrics.inc_service_error();
                warn!(error = %error, "chat query failed");
                format!("{SERVICE_ERROR_PREFIX}{error}")
            }
        }
    }

    async fn run(&self, kind: AgentKind, profile: &TravelerProfile) -> AgentOutput {
        let Some(agent) = self.agents.get(&kind) else {
            return AgentOutput::Text(format!("No agent found for request type: {kind}"));
        };
        self.metrics.inc_agent_call();

        let (query, detail, finish) = match agent.plan(profile) {
            QueryPlan::Answer(text) => {
                info!(agent = %kind, "agent answered without searching");
                return AgentOutput::Text(text);
            }
            QueryPlan::Search {
                query,
                detail,
                finish,
            } => (query, detail, finish),
        };

        let started = Instant::now();
        let result = self.service.search(&query, detail).await;
        self.metrics.observe_latency(started.elapsed());

        if let Err(error) = &result {
            self.metrics.inc_service_error();
            warn!(agent = %kind, error = %error, "search service call failed");
        }

        info!(
            agent = %kind,
            detail = %detail,
            backend = self.service.name(),
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "agent handled"
        );

        match (finish, result) {
            (Finish::CurrencyCode, Ok(answer)) => AgentOutput::Currency {
                currency: extract_currency_code(&answer),
            },
            (Finish::CurrencyCode, Err(_)) => AgentOutput::Currency {
                currency: DEFAULT_CURRENCY.to_string(),
            },
            (Finish::Verbatim, Ok(answer)) => AgentOutput::Text(answer),
            (Finish::Prefixed(banner), Ok(answer)) => AgentOutput::Text(format!("{banner}{answer}")),
            (Finish::Verbatim, Err(error)) => {
                AgentOutput::Text(format!("{SERVICE_ERROR_PREFIX}{error}"))
            }
            (Finish::Prefixed(banner), Err(error)) => {
                AgentOutput::Text(format!("{banner}{SERVICE_ERROR_PREFIX}{error}"))
            }
        }
    }
}
