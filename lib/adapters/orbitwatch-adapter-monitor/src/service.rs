use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};

use orbitwatch_domain::{
    AnomalyEvent, Credentials, DashboardRequest, DashboardSnapshot, ElementSet,
    ManualAlertRequest, ManualPredictRequest, ManualTrainRequest, MonitorConfig, MonitorError,
    RsoState, RsoStatus, ScoreReport, TelemetrySample,
};
use orbitwatch_ml::{Scorer, Trainer};
use orbitwatch_orbits::{
    geodetic, parse_element_set, propagate, ChaChaNoise, TelemetrySynthesizer,
};
use orbitwatch_ports::{ElementSetProvider, EventEmitter};

use crate::context::{MonitorContext, MonitoredObject};
use crate::dashboard::build_snapshot;
use crate::scheduler::{Scheduler, SchedulerState};

/// The cloneable bundle the background task runs with.
#[derive(Clone)]
struct CycleEngine {
    context: Arc<MonitorContext>,
    emitter: Arc<dyn EventEmitter>,
    trainer: Trainer,
    scorer: Scorer,
    synthesizer: Arc<Mutex<TelemetrySynthesizer<ChaChaNoise>>>,
}

impl CycleEngine {
    fn synthesize(
        &self,
        state: &orbitwatch_domain::OrbitalState,
        position: &orbitwatch_domain::GeodeticPosition,
    ) -> TelemetrySample {
        self.synthesizer
            .lock()
            .expect("synthesizer lock poisoned")
            .synthesize(state, position)
    }

    /// Synthetic training corpus: the object propagated backwards over
    /// recent instants, one minute apart.
    fn training_corpus(&self, object: &MonitoredObject, now: DateTime<Utc>) -> Vec<TelemetrySample> {
        let len = self.context.config.synthesis.training_corpus_size;
        (0..len)
            .filter_map(|index| {
                let at = now - chrono::Duration::seconds(60 * index as i64);
                let state = propagate(&object.elements, at);
                if !state.status.is_ok() {
                    return None;
                }
                let position = geodetic(&state);
                Some(self.synthesize(&state, &position))
            })
            .collect()
    }

    /// Fits and installs one object's model set. The fit runs without any
    /// shared lock; only the final install touches the registry.
    fn train_object(&self, norad_id: u32, corpus: &[TelemetrySample]) -> Result<(), MonitorError> {
        let set = self.trainer.fit(corpus)?;
        self.context.registry.install(norad_id, set);
        Ok(())
    }

    fn train_initial(&self, objects: &[MonitoredObject], now: DateTime<Utc>) {
        for object in objects {
            let norad_id = object.set.norad_id;
            let corpus = self.training_corpus(object, now);
            match self.train_object(norad_id, &corpus) {
                Ok(()) => {
                    tracing::debug!(norad_id, samples = corpus.len(), "initial model set installed");
                }
                Err(error) => {
                    tracing::warn!(norad_id, %error, "initial training deferred");
                }
            }
        }
    }

    fn record_event(&self, event: AnomalyEvent) {
        self.context.append_event(event.clone());
        self.emitter.emit_alert(event);
    }

    /// Wholesale element-set refresh between cycles. A failed refresh is
    /// logged and the previous sets stay in service until the next
    /// interval.
    async fn refresh_objects(
        &self,
        provider: &Arc<dyn ElementSetProvider>,
        credentials: &Credentials,
    ) {
        let object_ids = self.context.config.provider.object_ids.clone();
        match provider.fetch_element_sets(credentials, &object_ids).await {
            Ok(sets) => {
                let objects = parse_objects(sets);
                if objects.is_empty() {
                    tracing::warn!("element set refresh returned nothing usable");
                    return;
                }
                self.context.extend_objects(objects);
            }
            Err(error) => {
                tracing::warn!(%error, "element set refresh failed, retrying next cycle");
            }
        }
    }

    /// One monitoring cycle over every tracked object. Per-object failures
    /// are logged and skipped; they never abort the rest of the cycle.
    async fn run_cycle(&self) {
        let objects = self.context.objects();
        if objects.is_empty() {
            tracing::debug!("no monitored objects, skipping cycle");
            return;
        }

        let now = Utc::now();
        let mut panel_sample: Option<TelemetrySample> = None;

        for object in &objects {
            let norad_id = object.set.norad_id;
            let state = propagate(&object.elements, now);
            if !state.status.is_ok() {
                tracing::warn!(
                    norad_id,
                    code = state.status.code(),
                    "propagation failed, object skipped for this cycle"
                );
                continue;
            }

            let position = geodetic(&state);
            let sample = self.synthesize(&state, &position);
            let report = self.scorer.score(&self.context.registry, norad_id, &sample);

            self.context.update_state(RsoState {
                norad_id,
                name: object.set.name.clone(),
                position,
                speed_km_s: state.speed_km_s(),
                status: if report.is_anomaly {
                    RsoStatus::Anomalous
                } else {
                    RsoStatus::Operational
                },
                telemetry: sample.clone(),
                timestamp: now,
            });
            if panel_sample.is_none() {
                panel_sample = Some(sample.clone());
            }

            if let Some(classification) = report.classification {
                let event = AnomalyEvent {
                    id: self.context.next_event_id(),
                    object_id: object.set.object_id(),
                    object_name: object.set.name.clone(),
                    anomaly_type: classification.anomaly_type,
                    severity: classification.severity,
                    scores: report.scores,
                    aggregate_health: report.aggregate_health,
                    timestamp: now,
                    location: Some(position),
                    flagged: false,
                };
                tracing::info!(
                    norad_id,
                    anomaly_type = %classification.anomaly_type,
                    severity = %classification.severity,
                    "anomaly detected"
                );
                self.record_event(event);
            }

            if let Some(corpus) = self.context.record_sample(norad_id, sample) {
                match self.train_object(norad_id, &corpus) {
                    Ok(()) => tracing::info!(norad_id, samples = corpus.len(), "model set retrained"),
                    Err(error) => tracing::warn!(norad_id, %error, "retraining deferred"),
                }
            }
        }

        self.emitter
            .emit_snapshot(build_snapshot(&self.context, panel_sample.as_ref()));
    }
}

fn parse_objects(sets: Vec<ElementSet>) -> Vec<MonitoredObject> {
    sets.into_iter()
        .filter_map(|set| match parse_element_set(&set) {
            Ok(elements) => Some(MonitoredObject { set, elements }),
            Err(error) => {
                tracing::warn!(%error, "dropping unusable element set");
                None
            }
        })
        .collect()
}

/// The inbound command surface of the monitoring core.
pub struct MonitorService {
    engine: CycleEngine,
    provider: Arc<dyn ElementSetProvider>,
    scheduler: Scheduler,
}

impl MonitorService {
    pub fn new(
        config: MonitorConfig,
        provider: Arc<dyn ElementSetProvider>,
        emitter: Arc<dyn EventEmitter>,
    ) -> Self {
        let trainer = Trainer::new(config.scoring.min_training_samples, config.scoring.model_seed);
        let scorer = Scorer::from_config(&config.scoring);
        let synthesizer = TelemetrySynthesizer::with_seed(config.synthesis.noise_seed);
        let context = Arc::new(MonitorContext::new(config));
        Self {
            engine: CycleEngine {
                context,
                emitter,
                trainer,
                scorer,
                synthesizer: Arc::new(Mutex::new(synthesizer)),
            },
            provider,
            scheduler: Scheduler::new(),
        }
    }

    pub fn context(&self) -> &Arc<MonitorContext> {
        &self.engine.context
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Starts (or restarts) a monitoring session: stops and joins any
    /// previous cycle, resets session state, fetches the fleet, trains
    /// every object and launches the periodic cycle. Returns the number of
    /// monitored objects.
    pub async fn session_start(&self, credentials: Credentials) -> Result<usize, MonitorError> {
        // Join-before-restart: holding the guard proves the previous cycle
        // has fully exited, so the resets below cannot interleave with it.
        let guard = self.scheduler.restart().await;
        self.engine.context.reset_session();

        let object_ids = self.engine.context.config.provider.object_ids.clone();
        let sets = self
            .provider
            .fetch_element_sets(&credentials, &object_ids)
            .await?;
        let objects = parse_objects(sets);
        if objects.is_empty() {
            return Err(MonitorError::DataFetch(
                "provider returned no usable element sets".to_string(),
            ));
        }

        let now = Utc::now();
        self.engine.context.replace_objects(objects.clone());
        self.engine.train_initial(&objects, now);

        let engine = self.engine.clone();
        let provider = self.provider.clone();
        let interval = Duration::from_secs(
            self.engine.context.config.scheduler.cycle_interval_secs.max(1),
        );
        guard.launch(move |mut stop_rx| async move {
            tracing::info!(objects = engine.context.object_count(), "monitoring cycle started");
            loop {
                if *stop_rx.borrow() {
                    break;
                }
                engine.run_cycle().await;
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = stop_rx.changed() => break,
                }
                if *stop_rx.borrow() {
                    break;
                }
                engine.refresh_objects(&provider, &credentials).await;
            }
            tracing::info!("monitoring cycle stopped");
        });

        Ok(self.engine.context.object_count())
    }

    /// Stops the current session's cycle, if any, and waits for it.
    pub async fn stop(&self) {
        self.scheduler.stop().await;
    }

    /// Feeds the trainer directly, bypassing the provider fetch. The same
    /// corpus trains every listed object.
    pub fn manual_train(&self, request: ManualTrainRequest) -> Result<usize, MonitorError> {
        let objects = parse_objects(request.objects);
        self.engine.context.extend_objects(objects.clone());

        let mut installed = 0;
        for object in &objects {
            match self.engine.train_object(object.set.norad_id, &request.data) {
                Ok(()) => installed += 1,
                Err(error) => {
                    tracing::warn!(norad_id = object.set.norad_id, %error, "manual training deferred");
                }
            }
        }
        if installed == 0 && !objects.is_empty() {
            return Err(MonitorError::TrainingDataInsufficient {
                got: request.data.len(),
                required: self.engine.trainer.min_samples,
            });
        }
        Ok(installed)
    }

    /// One-shot scorer invocation; anomalous results are logged and
    /// re-emitted as alerts.
    pub fn manual_predict(&self, request: ManualPredictRequest) -> Result<ScoreReport, MonitorError> {
        request.telemetry.validate()?;
        let norad_id = request.object.norad_id;
        let report = self
            .engine
            .scorer
            .score(&self.engine.context.registry, norad_id, &request.telemetry);

        if let Some(classification) = report.classification {
            let location = self
                .engine
                .context
                .state_of(norad_id)
                .map(|state| state.position);
            let event = AnomalyEvent {
                id: self.engine.context.next_event_id(),
                object_id: format!("sat_{norad_id}"),
                object_name: request.object.name.clone(),
                anomaly_type: classification.anomaly_type,
                severity: classification.severity,
                scores: report.scores,
                aggregate_health: report.aggregate_health,
                timestamp: Utc::now(),
                location,
                flagged: false,
            };
            self.engine.record_event(event);
        }
        Ok(report)
    }

    /// Appends an externally supplied event and re-broadcasts it verbatim.
    pub fn manual_alert(&self, request: ManualAlertRequest) {
        self.engine.record_event(request.event);
    }

    /// Assembles and emits one snapshot on demand.
    pub fn dashboard_request(&self, request: DashboardRequest) -> DashboardSnapshot {
        let snapshot = build_snapshot(&self.engine.context, Some(&request.telemetry));
        self.engine.emitter.emit_snapshot(snapshot.clone());
        snapshot
    }

    pub fn flag_anomaly(&self, id: &str) -> bool {
        self.engine.context.flag_event(id)
    }

    /// Test-and-diagnostics hook: runs exactly one cycle inline.
    #[doc(hidden)]
    pub async fn run_cycle_once(&self) {
        self.engine.run_cycle().await;
    }
}
