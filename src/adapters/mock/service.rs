//! Scripted screen-time service for tests.
//!
//! Replies are queued per call kind (and per date for daily stats). A queued
//! reply is consumed once; a default reply is reused forever. Any reply can
//! be held behind a [`Gate`] so a test decides exactly when each in-flight
//! call completes.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{DailyReport, Overview};
use crate::traits::ScreenTimeService;

/// A call received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    Overview,
    Today,
    Daily(String),
}

/// Release point for a held reply.
///
/// Opening a gate before the call reaches it is fine; the permit is kept.
#[derive(Debug, Clone)]
pub struct Gate {
    permits: Arc<Semaphore>,
}

impl Gate {
    pub fn new() -> Self {
        Self {
            permits: Arc::new(Semaphore::new(0)),
        }
    }

    /// Let one held call through.
    pub fn open(&self) {
        self.permits.add_permits(1);
    }

    async fn wait(&self) {
        if let Ok(permit) = self.permits.acquire().await {
            permit.forget();
        }
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

/// One scripted outcome.
#[derive(Debug, Clone)]
pub struct MockReply<T> {
    result: ServiceResult<Option<T>>,
    gate: Option<Gate>,
}

impl<T> MockReply<T> {
    pub fn data(value: T) -> Self {
        Self {
            result: Ok(Some(value)),
            gate: None,
        }
    }

    /// Resolve to "no data".
    pub fn empty() -> Self {
        Self {
            result: Ok(None),
            gate: None,
        }
    }

    pub fn error(err: ServiceError) -> Self {
        Self {
            result: Err(err),
            gate: None,
        }
    }

    /// Hold this reply until `gate` is opened.
    pub fn gated(mut self, gate: &Gate) -> Self {
        self.gate = Some(gate.clone());
        self
    }
}

#[derive(Debug)]
struct ReplyQueue<T> {
    queued: VecDeque<MockReply<T>>,
    default: Option<MockReply<T>>,
}

impl<T: Clone> ReplyQueue<T> {
    fn next(&mut self) -> Option<MockReply<T>> {
        self.queued.pop_front().or_else(|| self.default.clone())
    }
}

impl<T> Default for ReplyQueue<T> {
    fn default() -> Self {
        Self {
            queued: VecDeque::new(),
            default: None,
        }
    }
}

#[derive(Debug, Default)]
struct Script {
    overview: ReplyQueue<Overview>,
    today: ReplyQueue<DailyReport>,
    daily_by_date: HashMap<String, ReplyQueue<DailyReport>>,
    daily_any: ReplyQueue<DailyReport>,
    calls: Vec<ServiceCall>,
}

/// Scripted [`ScreenTimeService`].
///
/// # Example
///
/// ```ignore
/// let service = MockScreenTimeService::new();
/// service.set_overview(MockReply::data(overview));
/// service.push_daily("2024-01-02", MockReply::empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockScreenTimeService {
    script: Arc<Mutex<Script>>,
}

impl MockScreenTimeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a one-shot overview reply.
    pub fn push_overview(&self, reply: MockReply<Overview>) {
        self.script.lock().unwrap().overview.queued.push_back(reply);
    }

    /// Reply used once the overview queue is empty.
    pub fn set_overview(&self, reply: MockReply<Overview>) {
        self.script.lock().unwrap().overview.default = Some(reply);
    }

    pub fn push_today(&self, reply: MockReply<DailyReport>) {
        self.script.lock().unwrap().today.queued.push_back(reply);
    }

    pub fn set_today(&self, reply: MockReply<DailyReport>) {
        self.script.lock().unwrap().today.default = Some(reply);
    }

    /// Queue a one-shot reply for a specific date.
    pub fn push_daily(&self, date: &str, reply: MockReply<DailyReport>) {
        self.script
            .lock()
            .unwrap()
            .daily_by_date
            .entry(date.to_string())
            .or_default()
            .queued
            .push_back(reply);
    }

    /// Reply for any date without a queued reply of its own.
    pub fn set_daily(&self, reply: MockReply<DailyReport>) {
        self.script.lock().unwrap().daily_any.default = Some(reply);
    }

    /// Every call received so far, in arrival order.
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn count(&self, call: &ServiceCall) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    pub fn overview_calls(&self) -> usize {
        self.count(&ServiceCall::Overview)
    }

    async fn resolve<T>(
        reply: Option<MockReply<T>>,
        call: &ServiceCall,
    ) -> ServiceResult<Option<T>> {
        let Some(reply) = reply else {
            return Err(ServiceError::Rejected(format!(
                "no mock reply for {:?}",
                call
            )));
        };
        if let Some(gate) = &reply.gate {
            gate.wait().await;
        }
        reply.result
    }
}

#[async_trait]
impl ScreenTimeService for MockScreenTimeService {
    async fn get_overview(&self) -> ServiceResult<Option<Overview>> {
        let call = ServiceCall::Overview;
        let reply = {
            let mut script = self.script.lock().unwrap();
            script.calls.push(call.clone());
            script.overview.next()
        };
        Self::resolve(reply, &call).await
    }

    async fn get_today_stats(&self) -> ServiceResult<Option<DailyReport>> {
        let call = ServiceCall::Today;
        let reply = {
            let mut script = self.script.lock().unwrap();
            script.calls.push(call.clone());
            script.today.next()
        };
        Self::resolve(reply, &call).await
    }

    async fn get_daily_stats(&self, date: &str) -> ServiceResult<Option<DailyReport>> {
        let call = ServiceCall::Daily(date.to_string());
        let reply = {
            let mut script = self.script.lock().unwrap();
            script.calls.push(call.clone());
            let specific = script
                .daily_by_date
                .get_mut(date)
                .and_then(|queue| queue.next());
            specific.or_else(|| script.daily_any.next())
        };
        Self::resolve(reply, &call).await
    }
}
