#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use rp_app::{FlowController, FlowSettings};
use rp_core::flow::{
    AccountSummary, EventRegistration, EventSummary, FlowState, LoginOutcome,
    RegistrationFormData, RegistrationOutcome, UserStatusSummary,
};
use rp_core::password_reset::{ResetPasswordRequest, ResetState};
use rp_core::ports::{
    AccountPort, ClockPort, EventPort, FlowObserverPort, OtpPort, PasswordResetObserverPort,
};
use rp_core::ApiError;

pub const EVENT_CODE: &str = "CRDF-2025-001";
pub const EVENT_NAME: &str = "CRDF Cyber Range 2025";

pub fn crdf_event() -> EventSummary {
    EventSummary {
        event_id: "42".into(),
        event_code: EVENT_CODE.into(),
        event_name: EVENT_NAME.into(),
        event_description: None,
        starts_at: Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap(),
        ends_at: Utc.with_ymd_and_hms(2025, 5, 3, 17, 0, 0).unwrap(),
        is_upcoming: true,
    }
}

pub fn created_account() -> AccountSummary {
    AccountSummary {
        user_id: Some("7".into()),
        email: Some("ada@example.org".into()),
        username: Some("ada".into()),
        status: Some("pending".into()),
    }
}

/// Scripted backend with per-call counters and an optional delay.
pub struct FakeBackend {
    pub delay: Mutex<Duration>,
    pub validate_calls: AtomicUsize,
    pub login_calls: AtomicUsize,
    pub user_check_calls: AtomicUsize,
    pub send_otp_calls: AtomicUsize,
    pub verify_otp_calls: AtomicUsize,
    pub register_calls: AtomicUsize,
    pub reset_calls: AtomicUsize,
    pub user_exists: Mutex<bool>,
    pub register_error: Mutex<Option<ApiError>>,
    pub user_check_error: Mutex<Option<ApiError>>,
    pub reset_error: Mutex<Option<ApiError>>,
    pub last_reset: Mutex<Option<ResetPasswordRequest>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            delay: Mutex::new(Duration::ZERO),
            validate_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            user_check_calls: AtomicUsize::new(0),
            send_otp_calls: AtomicUsize::new(0),
            verify_otp_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
            reset_calls: AtomicUsize::new(0),
            user_exists: Mutex::new(false),
            register_error: Mutex::new(None),
            user_check_error: Mutex::new(None),
            reset_error: Mutex::new(None),
            last_reset: Mutex::new(None),
        }
    }
}

impl FakeBackend {
    pub fn with_delay(delay: Duration) -> Self {
        let backend = Self::default();
        *backend.delay.lock().unwrap() = delay;
        backend
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl EventPort for FakeBackend {
    async fn validate_event_code(&self, code: &str) -> Result<EventSummary, ApiError> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if code == EVENT_CODE {
            Ok(crdf_event())
        } else {
            Err(ApiError::Detail("Invalid event code".into()))
        }
    }
}

#[async_trait]
impl AccountPort for FakeBackend {
    async fn login_and_join_event(
        &self,
        _email: &str,
        _password: &str,
        _event_code: &str,
    ) -> Result<LoginOutcome, ApiError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        Err(ApiError::PendingVerification)
    }

    async fn check_user_status(
        &self,
        email: &str,
        _event_code: Option<&str>,
    ) -> Result<UserStatusSummary, ApiError> {
        self.user_check_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if let Some(err) = self.user_check_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(UserStatusSummary {
            user_exists: *self.user_exists.lock().unwrap(),
            user_email: Some(email.to_string()),
            ..Default::default()
        })
    }

    async fn register_with_event(
        &self,
        _form: &RegistrationFormData,
        event_code: &str,
    ) -> Result<RegistrationOutcome, ApiError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if let Some(err) = self.register_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(RegistrationOutcome {
            account: created_account(),
            event_registration: Some(EventRegistration {
                event_name: EVENT_NAME.into(),
                event_code: event_code.into(),
                registration_id: Some("r-1".into()),
                registered_at: None,
            }),
        })
    }

    async fn register_with_otp(
        &self,
        _form: &RegistrationFormData,
        _otp_id: &str,
    ) -> Result<RegistrationOutcome, ApiError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if let Some(err) = self.register_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(RegistrationOutcome {
            account: created_account(),
            event_registration: None,
        })
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<String, ApiError> {
        self.reset_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        *self.last_reset.lock().unwrap() = Some(request.clone());
        match self.reset_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok("Password reset successfully".into()),
        }
    }
}

#[async_trait]
impl OtpPort for FakeBackend {
    async fn send_otp(&self, _email: &str) -> Result<String, ApiError> {
        self.send_otp_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        Ok("OTP sent".into())
    }

    async fn verify_otp(&self, _email: &str, code: &str) -> Result<String, ApiError> {
        self.verify_otp_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if code == "123456" {
            Ok("otp-1".into())
        } else {
            Err(ApiError::Detail("Invalid or expired OTP".into()))
        }
    }
}

pub struct FixedClock {
    pub now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap()),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    pub flow_states: Mutex<Vec<FlowState>>,
    pub reset_states: Mutex<Vec<ResetState>>,
}

#[async_trait]
impl FlowObserverPort for RecordingObserver {
    async fn emit_flow_state_changed(&self, state: FlowState) {
        self.flow_states.lock().unwrap().push(state);
    }
}

#[async_trait]
impl PasswordResetObserverPort for RecordingObserver {
    async fn emit_reset_state_changed(&self, state: ResetState) {
        self.reset_states.lock().unwrap().push(state);
    }
}

pub struct Harness {
    pub controller: FlowController,
    pub backend: Arc<FakeBackend>,
    pub clock: Arc<FixedClock>,
    pub observer: Arc<RecordingObserver>,
}

pub fn harness(backend: FakeBackend, settings: FlowSettings) -> Harness {
    let backend = Arc::new(backend);
    let clock = Arc::new(FixedClock::new());
    let observer = Arc::new(RecordingObserver::default());
    let controller = FlowController::new(
        backend.clone(),
        backend.clone(),
        backend.clone(),
        clock.clone(),
        observer.clone(),
        settings,
    );
    Harness {
        controller,
        backend,
        clock,
        observer,
    }
}
