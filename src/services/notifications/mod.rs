//! 환영 알림 서비스
//!
//! 가입 직후 환영 메일을 보내는 작업을 요청 처리와 분리합니다.
//!
//! ```text
//! register() ──try_send──▶ [bounded mpsc queue] ──▶ worker task ──▶ Mailer::send
//!                │                                        │
//!                └─ 가득 참/닫힘: warn! 후 폐기             └─ 실패: error! 후 다음 메시지
//! ```
//!
//! 큐에 넣는 쪽은 절대 기다리지 않으며, 알림 실패가 가입 결과에 영향을 주지 않습니다.
//! 재시도는 하지 않습니다.

use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info, warn};
use thiserror::Error;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::config::NotificationConfig;

const WELCOME_SUBJECT: &str = "Welcome aboard!";
const WELCOME_BODY: &str = "Hello!<br><br>Thanks for signing up. We are happy to have you.<br><br>The Account Service team";

/// 환영 메일 내용
#[derive(Debug, Clone, PartialEq)]
pub struct WelcomeMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl WelcomeMessage {
    pub fn for_recipient(email: &str) -> Self {
        Self {
            to: email.to_string(),
            subject: WELCOME_SUBJECT.to_string(),
            body: WELCOME_BODY.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("mail delivery failed: {0}")]
    Delivery(String),
}

/// 메일 발송 수단
///
/// 실제 SMTP 연동은 이 trait을 구현해 [`WelcomeDispatcher::spawn`]에 넘깁니다.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &WelcomeMessage) -> Result<(), NotificationError>;
}

/// 발송 대신 로그만 남기는 기본 Mailer
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &WelcomeMessage) -> Result<(), NotificationError> {
        info!("📧 환영 메일 발송: to={} subject={:?}", message.to, message.subject);
        Ok(())
    }
}

/// 환영 알림 큐의 송신 측
///
/// 복제해서 여러 워커 스레드에서 함께 사용할 수 있습니다.
#[derive(Clone)]
pub struct WelcomeDispatcher {
    sender: mpsc::Sender<WelcomeMessage>,
}

impl WelcomeDispatcher {
    /// 큐를 만들고 소비 워커를 현재 런타임에 띄웁니다.
    ///
    /// 모든 송신 측이 drop되면 워커도 종료됩니다.
    pub fn spawn(config: NotificationConfig, mailer: Arc<dyn Mailer>) -> Self {
        let (dispatcher, receiver) = Self::channel(config.queue_capacity);
        tokio::spawn(run_worker(receiver, mailer));

        info!("✅ 환영 알림 워커 시작 (queue_capacity={})", config.queue_capacity);
        dispatcher
    }

    /// 워커 없이 큐만 생성합니다. 수신 측은 호출자가 소비합니다.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<WelcomeMessage>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }

    /// 환영 메일을 큐에 넣습니다.
    ///
    /// 큐가 가득 찼거나 워커가 종료된 경우 메시지를 버리고 `false`를 반환합니다.
    pub fn dispatch(&self, email: &str) -> bool {
        match self.sender.try_send(WelcomeMessage::for_recipient(email)) {
            Ok(()) => true,
            Err(TrySendError::Full(message)) => {
                warn!("환영 알림 큐가 가득 차 폐기합니다: to={}", message.to);
                false
            }
            Err(TrySendError::Closed(message)) => {
                warn!("환영 알림 워커가 종료되어 폐기합니다: to={}", message.to);
                false
            }
        }
    }
}

/// 큐가 닫힐 때까지 메시지를 하나씩 발송합니다.
pub async fn run_worker(mut receiver: mpsc::Receiver<WelcomeMessage>, mailer: Arc<dyn Mailer>) {
    while let Some(message) = receiver.recv().await {
        if let Err(e) = mailer.send(&message).await {
            error!("환영 메일 발송 실패: to={} error={}", message.to, e);
        }
    }

    info!("환영 알림 워커 종료");
}
