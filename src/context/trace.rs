//! Trace id carriers and record enrichment.

use std::fmt;

use uuid::Uuid;

use crate::logging::record::Field;

/// Record key under which the correlation id is written.
pub const TRACE_ID_KEY: &str = "traceId";

/// Anything that can hand out a correlation id for the current request.
pub trait TraceSource {
    fn trace_id(&self) -> Option<String>;
}

/// Request-scoped value carrier holding an optional trace id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    trace_id: Option<String>,
}

impl RequestContext {
    /// A context with no trace id.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context carrying `id`, stored as its `Display` rendering.
    pub fn with_trace_id(id: impl fmt::Display) -> Self {
        Self {
            trace_id: Some(id.to_string()),
        }
    }

    /// A context with a freshly generated trace id.
    pub fn generate() -> Self {
        Self::with_trace_id(Uuid::new_v4())
    }

    pub fn trace_id_str(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }
}

impl TraceSource for RequestContext {
    fn trace_id(&self) -> Option<String> {
        self.trace_id.clone()
    }
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.trace_id {
            Some(tid) => write!(f, "[trace={}]", tid),
            None => write!(f, "[trace=-]"),
        }
    }
}

/// Append a `traceId` field after the caller's fields when `ctx` carries
/// a trace id. Absent contexts and contexts without an id leave `fields`
/// untouched.
pub fn enrich(ctx: Option<&dyn TraceSource>, mut fields: Vec<Field>) -> Vec<Field> {
    if let Some(trace_id) = ctx.and_then(|c| c.trace_id()) {
        fields.push(Field::new(TRACE_ID_KEY, trace_id));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::record::field;
    use proptest::prelude::*;

    struct TypedId(u64);

    impl TraceSource for TypedId {
        fn trace_id(&self) -> Option<String> {
            Some(format!("req-{:06}", self.0))
        }
    }

    #[test]
    fn test_enrich_without_context() {
        let fields = enrich(None, vec![field("test", "value")]);
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_enrich_without_trace_id() {
        let ctx = RequestContext::background();
        let fields = enrich(Some(&ctx), vec![field("test", "value")]);
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_enrich_appends_trace_id_last() {
        let ctx = RequestContext::with_trace_id("test-trace-123");
        let fields = enrich(Some(&ctx), vec![field("test", "value")]);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1], field(TRACE_ID_KEY, "test-trace-123"));
    }

    #[test]
    fn test_trace_id_of_any_display_type() {
        assert_eq!(RequestContext::with_trace_id(12345).trace_id_str(), Some("12345"));
        assert_eq!(
            enrich(Some(&TypedId(7)), vec![])[0].value,
            serde_json::Value::from("req-000007")
        );
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = RequestContext::generate();
        let b = RequestContext::generate();
        assert!(a.trace_id_str().is_some());
        assert_ne!(a, b);
    }

    #[test]
    fn test_context_display() {
        assert_eq!(RequestContext::with_trace_id("t-1").to_string(), "[trace=t-1]");
        assert_eq!(RequestContext::background().to_string(), "[trace=-]");
    }

    proptest! {
        #[test]
        fn prop_enrichment_field_count(
            k in 0usize..16,
            id in proptest::option::of("[a-z0-9-]{1,24}")
        ) {
            let fields: Vec<Field> = (0..k).map(|i| field(format!("f{}", i), i)).collect();
            let ctx = match &id {
                Some(id) => RequestContext::with_trace_id(id),
                None => RequestContext::background(),
            };

            let enriched = enrich(Some(&ctx), fields);
            match id {
                Some(id) => {
                    prop_assert_eq!(enriched.len(), k + 1);
                    prop_assert_eq!(&*enriched[k].key, TRACE_ID_KEY);
                    prop_assert_eq!(&enriched[k].value, &serde_json::Value::from(id));
                }
                None => prop_assert_eq!(enriched.len(), k),
            }
        }
    }
}
