use ironvim_soap::{Context, RoundTripper, SoapBody, SoapError};
use ironvim_vim25::methods;
use ironvim_vim25::types::{
    CurrentTime, DateTime, ManagedObjectReference, RetrieveServiceContent, ServiceContent,
};
use tracing::{info, instrument};

use crate::ClientError;
use crate::property::Collector;
use crate::session::SessionManager;
use crate::task::TaskWaiter;

/// A round tripper paired with the `ServiceContent` it was connected with.
#[derive(Debug)]
pub struct VimClient<R> {
    rt: R,
    service_content: ServiceContent,
}

impl<R: RoundTripper> VimClient<R> {
    /// Fetches the `ServiceContent` of the `ServiceInstance` through `rt`.
    #[instrument(name = "vim_client.connect", level = "info", skip_all, err)]
    pub fn connect(ctx: &Context, rt: R) -> Result<Self, ClientError> {
        let service_content = methods::retrieve_service_content(
            ctx,
            &rt,
            RetrieveServiceContent::new(ManagedObjectReference::service_instance()),
        )?
        .returnval;

        info!(
            product = %service_content.about.full_name,
            api_version = %service_content.about.api_version,
            vcenter = service_content.about.is_vcenter(),
            "connected"
        );

        Ok(Self::with_service_content(rt, service_content))
    }

    pub fn with_service_content(rt: R, service_content: ServiceContent) -> Self {
        Self {
            rt,
            service_content,
        }
    }

    pub fn service_content(&self) -> &ServiceContent {
        &self.service_content
    }

    pub fn round_tripper(&self) -> &R {
        &self.rt
    }

    pub fn into_inner(self) -> R {
        self.rt
    }

    pub fn is_vcenter(&self) -> bool {
        self.service_content.about.is_vcenter()
    }

    pub fn current_time(&self, ctx: &Context) -> Result<DateTime, ClientError> {
        let response = methods::current_time(
            ctx,
            self,
            CurrentTime::new(ManagedObjectReference::service_instance()),
        )?;
        Ok(response.returnval)
    }

    pub fn property_collector(&self) -> Collector<'_, Self> {
        Collector::new(self, self.service_content.property_collector.clone())
    }

    pub fn session_manager(&self) -> Result<SessionManager<'_, R>, ClientError> {
        SessionManager::new(self)
    }

    pub fn task_waiter(&self) -> TaskWaiter<'_, Self> {
        TaskWaiter::new(self.property_collector())
    }
}

impl<R: RoundTripper> RoundTripper for VimClient<R> {
    fn round_trip(
        &self,
        ctx: &Context,
        req: &dyn SoapBody,
        res: &mut dyn SoapBody,
    ) -> Result<(), SoapError> {
        self.rt.round_trip(ctx, req, res)
    }
}
