use crate::controller::Controller;
use crate::error::{FrameworkError, NOT_FOUND_LABEL};
use crate::factory::AppFactory;
use crate::logger::{build_log_message, LogFile};
use crate::model::strip_tags;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Method resolved when the URL carries no second segment.
pub const DEFAULT_METHOD: &str = "index";

/// Controller name that is never routable from a URL; it is reachable only
/// through the error fallback.
pub const RESERVED_ERROR_CONTROLLER: &str = "error";

/// Subdirectory name the controller discovery scan skips.
pub const EXCLUDED_CONTROLLER_DIR: &str = "private";

/// First URL segment index that carries method parameters.
pub const PARAM_INDEX_START: usize = 2;

/// Normalized URL segments for one request.
///
/// Normalization trims the trailing slash, strips HTML tags, and splits on
/// `/`. An absent or empty `url` value yields a single empty-string segment,
/// which downstream resolution reads as "no controller specified".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSegments {
    segments: Vec<String>,
}

impl RouteSegments {
    /// Normalize the `url` field of the request's query data.
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let raw = query.get("url").map(String::as_str).unwrap_or_default();
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim_end_matches('/');
        let clean = strip_tags(trimmed);
        let segments = clean.split('/').map(str::to_string).collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// First segment: the controller name, empty when none was given.
    pub fn controller(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or_default()
    }

    /// Second segment: the method name, if present and non-empty.
    pub fn method(&self) -> Option<&str> {
        self.segments
            .get(1)
            .map(String::as_str)
            .filter(|m| !m.is_empty())
    }

    /// Segments from the parameter index onward, re-indexed from zero.
    pub fn parameters(&self) -> Vec<String> {
        self.segments
            .iter()
            .skip(PARAM_INDEX_START)
            .cloned()
            .collect()
    }

    /// The normalized path, re-joined for log lines.
    pub fn joined(&self) -> String {
        self.segments.join("/")
    }
}

/// A fully resolved dispatch target, before invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTarget {
    pub controller: String,
    pub method: String,
    pub parameters: Vec<String>,
}

/// The result of one dispatch: the resolved target plus the rendered body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub controller: String,
    pub method: String,
    pub parameters: Vec<String>,
    pub body: String,
}

/// The front controller. One value per request; the entire pipeline runs in
/// [`Application::new`].
#[derive(Debug)]
pub struct Application {
    outcome: DispatchOutcome,
}

impl Application {
    /// Dispatch the request described by `query`.
    ///
    /// Recoverable failures (unknown controller, unknown method, the literal
    /// `error` segment) are absorbed by rewriting the target to the error
    /// controller; storage and configuration failures, and any failure
    /// building the error controller itself, propagate to the caller.
    pub fn new(
        factory: &AppFactory,
        query: &HashMap<String, String>,
        default_controller: &str,
    ) -> Result<Self, FrameworkError> {
        let segments = RouteSegments::from_query(query);
        debug!(path = %segments.joined(), "dispatch started");

        let (mut controller, name) = match Self::resolve_controller(
            factory,
            &segments,
            default_controller,
        ) {
            Ok(resolved) => resolved,
            Err(err) if err.is_recoverable() => {
                return Self::fallback(factory, &segments, &err);
            }
            Err(err) => return Err(err),
        };

        let method = match Self::resolve_method(controller.as_ref(), &segments) {
            Ok(method) => method,
            Err(err) => {
                debug_assert!(err.is_recoverable());
                return Self::fallback(factory, &segments, &err);
            }
        };

        let target = DispatchTarget {
            parameters: Self::resolve_parameters(&name, &method, &segments),
            controller: name,
            method,
        };

        info!(
            controller = %target.controller,
            method = %target.method,
            parameters = ?target.parameters,
            "dispatching"
        );

        let body = match controller.invoke(&target.method, &target.parameters) {
            Ok(body) => body,
            Err(err) if err.is_recoverable() => {
                return Self::fallback(factory, &segments, &err);
            }
            Err(err) => return Err(err),
        };

        Ok(Self {
            outcome: DispatchOutcome {
                controller: target.controller,
                method: target.method,
                parameters: target.parameters,
                body,
            },
        })
    }

    pub fn outcome(&self) -> &DispatchOutcome {
        &self.outcome
    }

    pub fn body(&self) -> &str {
        &self.outcome.body
    }

    /// Resolve and build the controller for the first segment.
    ///
    /// The empty segment selects the default controller; a build failure
    /// there is reported as an unclassified dispatch failure rather than a
    /// not-found, since the user named nothing wrong. The literal reserved
    /// error name is never routable.
    fn resolve_controller(
        factory: &AppFactory,
        segments: &RouteSegments,
        default_controller: &str,
    ) -> Result<(Box<dyn Controller>, String), FrameworkError> {
        let requested = segments.controller();

        if requested.is_empty() {
            let controller = factory.make_controller(default_controller).map_err(|err| {
                if err.is_recoverable() {
                    FrameworkError::UnknownDispatch(format!(
                        "default controller `{default_controller}` unavailable: {err}"
                    ))
                } else {
                    err
                }
            })?;
            return Ok((controller, default_controller.to_string()));
        }

        if requested == RESERVED_ERROR_CONTROLLER || !factory.is_routable(requested) {
            return Err(FrameworkError::ControllerNotFound {
                name: requested.to_string(),
            });
        }

        let controller = factory.make_controller(requested)?;
        Ok((controller, requested.to_string()))
    }

    /// Resolve the method segment against the controller's capability set.
    fn resolve_method(
        controller: &dyn Controller,
        segments: &RouteSegments,
    ) -> Result<String, FrameworkError> {
        match segments.method() {
            None => Ok(DEFAULT_METHOD.to_string()),
            Some(method) if controller.has_method(method) => Ok(method.to_string()),
            Some(method) => Err(FrameworkError::MethodNotFound {
                controller: controller.name().to_string(),
                method: method.to_string(),
            }),
        }
    }

    /// Resolve method parameters from the remaining segments.
    ///
    /// The index method with at most two total segments receives the
    /// lowercased controller name as its single parameter; everything else
    /// receives the segments past the method position, re-indexed from zero.
    fn resolve_parameters(
        controller_name: &str,
        method: &str,
        segments: &RouteSegments,
    ) -> Vec<String> {
        if method == DEFAULT_METHOD && segments.segments().len() <= PARAM_INDEX_START {
            vec![controller_name.to_lowercase()]
        } else {
            segments.parameters()
        }
    }

    /// Rewrite the dispatch to the error controller and invoke it.
    ///
    /// Writes exactly one page-not-found log line carrying the raw joined
    /// URL, then builds the error controller and renders it with the error's
    /// fallback label as the single parameter. A failure building or
    /// invoking the error controller propagates; there is no second
    /// fallback.
    fn fallback(
        factory: &AppFactory,
        segments: &RouteSegments,
        err: &FrameworkError,
    ) -> Result<Self, FrameworkError> {
        let label = err.fallback_label();
        // Log kinds are lowercase vocabulary; the label doubles as the kind
        // only for the not-found case.
        let kind = if label == NOT_FOUND_LABEL { label } else { "unknown" };
        let joined = segments.joined();

        warn!(
            path = %joined,
            kind = %kind,
            error = %err,
            "dispatch fallback to error controller"
        );
        let msg = build_log_message([("User entered", joined.as_str())]);
        factory.make_logger().write(&msg, kind, LogFile::PageNotFound);

        let mut controller = factory.make_controller(RESERVED_ERROR_CONTROLLER)?;
        let parameters = vec![label.to_string()];
        let body = controller.invoke(DEFAULT_METHOD, &parameters)?;

        Ok(Self {
            outcome: DispatchOutcome {
                controller: RESERVED_ERROR_CONTROLLER.to_string(),
                method: DEFAULT_METHOD.to_string(),
                parameters,
                body,
            },
        })
    }
}
