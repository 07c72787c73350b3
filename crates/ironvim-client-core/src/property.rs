use ironvim_soap::{Context, RoundTripper};
use ironvim_vim25::methods;
use ironvim_vim25::types::{
    AnyType, ContinueRetrievePropertiesEx, ManagedObjectReference, ObjectContent, ObjectSpec,
    PropertyFilterSpec, PropertySpec, RetrieveOptions, RetrievePropertiesEx,
};
use tracing::{debug, instrument};

use crate::ClientError;

/// Reads properties through a `PropertyCollector`.
#[derive(Debug)]
pub struct Collector<'c, R: ?Sized> {
    rt: &'c R,
    reference: ManagedObjectReference,
    max_objects: Option<i32>,
}

impl<'c, R: RoundTripper + ?Sized> Collector<'c, R> {
    pub fn new(rt: &'c R, reference: ManagedObjectReference) -> Self {
        Self {
            rt,
            reference,
            max_objects: None,
        }
    }

    /// Page size hint passed as `RetrieveOptions.maxObjects`.
    #[must_use]
    pub fn with_max_objects(mut self, max_objects: i32) -> Self {
        self.max_objects = Some(max_objects);
        self
    }

    pub fn reference(&self) -> &ManagedObjectReference {
        &self.reference
    }

    /// Retrieves `props` of every object in `objs`, following continuation tokens.
    ///
    /// An empty `props` selects all properties.
    #[instrument(
        name = "property_collector.retrieve",
        level = "debug",
        skip_all,
        fields(objects = objs.len(), props = ?props),
        err
    )]
    pub fn retrieve(
        &self,
        ctx: &Context,
        objs: &[ManagedObjectReference],
        props: &[&str],
    ) -> Result<Vec<ObjectContent>, ClientError> {
        if objs.is_empty() {
            return Ok(Vec::new());
        }

        let mut kinds: Vec<&str> = Vec::new();
        for obj in objs {
            if !kinds.contains(&obj.kind.as_str()) {
                kinds.push(&obj.kind);
            }
        }

        let spec = PropertyFilterSpec {
            prop_set: kinds
                .into_iter()
                .map(|kind| PropertySpec::new(kind, props.iter().copied()))
                .collect(),
            object_set: objs.iter().cloned().map(ObjectSpec::new).collect(),
            report_missing_objects_in_results: None,
        };

        let request = RetrievePropertiesEx {
            this: self.reference.clone(),
            spec_set: vec![spec],
            options: RetrieveOptions {
                max_objects: self.max_objects,
            },
        };

        let mut page = methods::retrieve_properties_ex(ctx, self.rt, request)?.returnval;
        let mut objects = Vec::new();

        while let Some(result) = page {
            objects.extend(result.objects);
            page = match result.token {
                Some(token) => {
                    debug!(%token, fetched = objects.len(), "continuing retrieval");
                    let request = ContinueRetrievePropertiesEx {
                        this: self.reference.clone(),
                        token,
                    };
                    Some(methods::continue_retrieve_properties_ex(ctx, self.rt, request)?.returnval)
                }
                None => None,
            };
        }

        Ok(objects)
    }

    /// Retrieves `props` of a single object.
    pub fn retrieve_one(
        &self,
        ctx: &Context,
        obj: &ManagedObjectReference,
        props: &[&str],
    ) -> Result<ObjectContent, ClientError> {
        self.retrieve(ctx, std::slice::from_ref(obj), props)?
            .into_iter()
            .find(|content| &content.obj == obj)
            .ok_or_else(|| ClientError::MissingProperty {
                obj: obj.clone(),
                property: props.join(","),
            })
    }

    /// Retrieves a single property value.
    pub fn retrieve_property(
        &self,
        ctx: &Context,
        obj: &ManagedObjectReference,
        name: &str,
    ) -> Result<AnyType, ClientError> {
        let content = self.retrieve_one(ctx, obj, &[name])?;

        if let Some(missing) = content.missing_set.iter().find(|missing| missing.path == name) {
            debug!(%obj, property = name, fault = missing.fault.kind(), "property not readable");
        }

        content
            .prop_set
            .into_iter()
            .find(|property| property.name == name)
            .map(|property| property.val)
            .ok_or_else(|| ClientError::MissingProperty {
                obj: obj.clone(),
                property: name.to_string(),
            })
    }
}
