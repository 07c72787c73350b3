use ironvim_soap::{Context, RoundTripper};
use ironvim_vim25::methods;
use ironvim_vim25::types::{
    AnyType, Login, Logout, ManagedObjectReference, SessionIsActive, UserSession,
};
use tracing::{info, instrument};

use crate::ClientError;
use crate::vim::VimClient;

/// Wraps the `SessionManager` managed object of a connected client.
#[derive(Debug)]
pub struct SessionManager<'c, R> {
    client: &'c VimClient<R>,
    reference: ManagedObjectReference,
}

impl<'c, R: RoundTripper> SessionManager<'c, R> {
    /// Fails when the endpoint has no session manager.
    pub fn new(client: &'c VimClient<R>) -> Result<Self, ClientError> {
        let reference = client
            .service_content()
            .session_manager
            .clone()
            .ok_or_else(|| ClientError::MissingProperty {
                obj: ManagedObjectReference::service_instance(),
                property: "content.sessionManager".to_string(),
            })?;
        Ok(Self { client, reference })
    }

    pub fn reference(&self) -> &ManagedObjectReference {
        &self.reference
    }

    #[instrument(name = "session.login", level = "info", skip(self, ctx, password), err)]
    pub fn login(
        &self,
        ctx: &Context,
        user_name: &str,
        password: &str,
    ) -> Result<UserSession, ClientError> {
        let request = Login {
            this: self.reference.clone(),
            user_name: user_name.to_string(),
            password: password.to_string(),
            locale: None,
        };
        let session = methods::login(ctx, self.client, request)?.returnval;
        info!(key = %session.key, full_name = %session.full_name, "logged in");
        Ok(session)
    }

    #[instrument(name = "session.logout", level = "info", skip_all, err)]
    pub fn logout(&self, ctx: &Context) -> Result<(), ClientError> {
        methods::logout(ctx, self.client, Logout::new(self.reference.clone()))?;
        Ok(())
    }

    /// The session of this connection, `None` when not logged in.
    pub fn user_session(&self, ctx: &Context) -> Result<Option<UserSession>, ClientError> {
        let objects = self
            .client
            .property_collector()
            .retrieve(ctx, std::slice::from_ref(&self.reference), &["currentSession"])?;

        let Some(value) = objects
            .into_iter()
            .next()
            .and_then(|content| content.prop_set.into_iter().next())
            .map(|property| property.val)
        else {
            return Ok(None);
        };

        match value {
            AnyType::UserSession(session) => Ok(Some(*session)),
            other => Err(ClientError::UnexpectedValue {
                property: "currentSession".to_string(),
                expected: "UserSession",
                found: other.type_name().to_string(),
            }),
        }
    }

    pub fn session_is_active(
        &self,
        ctx: &Context,
        session_id: &str,
        user_name: &str,
    ) -> Result<bool, ClientError> {
        let request = SessionIsActive {
            this: self.reference.clone(),
            session_id: session_id.to_string(),
            user_name: user_name.to_string(),
        };
        Ok(methods::session_is_active(ctx, self.client, request)?.returnval)
    }
}
