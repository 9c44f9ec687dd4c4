use std::future::Future;
use std::sync::Arc;

use async_nats::Client;
use async_nats::Message;
use futures::StreamExt;
use thiserror::Error;
use tokio::task::JoinSet;

use super::handlers::login_user::login_user;
use super::handlers::register_user::register_user;
use super::handlers::verify_user::verify_user;
use super::messages::ReplyMessage;
use super::messages::RequestMessage;
use crate::credential::ports::CredentialServicePort;

pub const REGISTER_SUBJECT: &str = "auth.register.user";
pub const LOGIN_SUBJECT: &str = "auth.login.user";
pub const VERIFY_SUBJECT: &str = "auth.verify.user";

#[derive(Debug, Error)]
pub enum NatsServerError {
    #[error("Failed to subscribe to '{subject}': {message}")]
    Subscribe {
        subject: &'static str,
        message: String,
    },

    #[error("Subscription to '{0}' closed")]
    SubscriptionClosed(&'static str),

    #[error("Subscription task failed: {0}")]
    Task(String),
}

/// Request/reply operation exposed on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Register,
    Login,
    Verify,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Register, Route::Login, Route::Verify];

    pub fn subject(&self) -> &'static str {
        match self {
            Route::Register => REGISTER_SUBJECT,
            Route::Login => LOGIN_SUBJECT,
            Route::Verify => VERIFY_SUBJECT,
        }
    }
}

/// Handle one raw request and produce the serialized reply.
///
/// Never fails: every error is folded into the reply's `err` field.
pub async fn dispatch<S: CredentialServicePort>(
    route: Route,
    service: &S,
    payload: &[u8],
) -> Vec<u8> {
    let request = match RequestMessage::from_bytes(payload) {
        Ok(request) => request,
        Err(err) => return ReplyMessage::<()>::from_result(None, Err(err)).to_bytes(),
    };

    let result = match route {
        Route::Register => register_user(service, request.data).await,
        Route::Login => login_user(service, request.data).await,
        Route::Verify => verify_user(service, request.data).await,
    };

    if let Err(err) = &result {
        tracing::debug!(
            subject = route.subject(),
            status = err.status,
            message = %err.message,
            "Request failed"
        );
    }

    ReplyMessage::from_result(request.id, result).to_bytes()
}

/// NATS request/reply server for the credential operations.
///
/// One subscription per subject, all in the same queue group so that
/// several instances share the load.
pub struct NatsServer<S>
where
    S: CredentialServicePort,
{
    client: Client,
    service: Arc<S>,
    queue_group: String,
}

impl<S> NatsServer<S>
where
    S: CredentialServicePort,
{
    pub fn new(client: Client, service: Arc<S>, queue_group: impl Into<String>) -> Self {
        Self {
            client,
            service,
            queue_group: queue_group.into(),
        }
    }

    /// Serve until a subscription ends or `shutdown` resolves.
    ///
    /// # Errors
    /// * `Subscribe` - A subject could not be subscribed
    /// * `SubscriptionClosed` - The server closed a subscription
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<(), NatsServerError>
    where
        F: Future<Output = ()> + Send,
    {
        let mut tasks = JoinSet::new();

        for route in Route::ALL {
            let mut subscriber = self
                .client
                .queue_subscribe(route.subject(), self.queue_group.clone())
                .await
                .map_err(|e| NatsServerError::Subscribe {
                    subject: route.subject(),
                    message: e.to_string(),
                })?;

            tracing::info!(
                subject = route.subject(),
                queue_group = %self.queue_group,
                "Subscribed"
            );

            let client = self.client.clone();
            let service = Arc::clone(&self.service);

            tasks.spawn(async move {
                while let Some(message) = subscriber.next().await {
                    // Requests run concurrently; bcrypt must not serialize a subject
                    tokio::spawn(respond(
                        route,
                        client.clone(),
                        Arc::clone(&service),
                        message,
                    ));
                }
                route.subject()
            });
        }

        let outcome = tokio::select! {
            _ = shutdown => {
                tracing::info!("Shutdown signal received, stopping subscriptions");
                Ok(())
            }
            Some(finished) = tasks.join_next() => match finished {
                Ok(subject) => Err(NatsServerError::SubscriptionClosed(subject)),
                Err(e) => Err(NatsServerError::Task(e.to_string())),
            },
        };

        tasks.abort_all();
        outcome
    }
}

async fn respond<S: CredentialServicePort>(
    route: Route,
    client: Client,
    service: Arc<S>,
    message: Message,
) {
    let Some(reply) = message.reply.clone() else {
        tracing::warn!(
            subject = route.subject(),
            "Dropping request without reply subject"
        );
        return;
    };

    let body = dispatch(route, service.as_ref(), &message.payload).await;

    if let Err(e) = client.publish(reply, body.into()).await {
        tracing::error!(
            subject = route.subject(),
            error = %e,
            "Failed to publish reply"
        );
    }
}
