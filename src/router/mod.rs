//! Hierarchical hash routing over the component engine.
//!
//! A path like `/root/user/3` is a chain of progressively longer prefixes,
//! each mapped to a view. Navigation walks the chain shallowest-first:
//! ancestor views whose prefix already matches are reused in place, and
//! mounting resumes at the first divergent depth, replacing the stale view
//! (or filling a fresh `data-r` placeholder). A view guard can redirect,
//! which abandons the current chain and restarts navigation at the new
//! path.

pub mod events;
pub mod paths;

use tracing::debug;

use crate::component::{Engine, EngineError, MountRequest, Mounted, ATTR_ROUTE};
use crate::document::Document;
use crate::dom::NodeId;

pub use events::{RouterEvent, RouterEvents};
pub use paths::{normalize, progressive_paths};

/// Errors from navigation.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// A prefix of the requested path has no registered route.
    #[error("no route registered for {path:?}")]
    RouteNotFound { path: String },
    /// The parent view offers no `data-r` placeholder to mount into.
    #[error("no view placeholder available for {path:?}")]
    MissingPlaceholder { path: String },
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// One registered route: an exact normalized path and the view it mounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub view: String,
}

/// One mounted level of the current view chain.
#[derive(Debug)]
struct Frame {
    path: String,
    node: NodeId,
}

/// The hierarchical router.
///
/// Owns the document and the engine; `navigate` takes `&mut self`, so
/// navigations cannot interleave.
pub struct Router {
    routes: Vec<Route>,
    engine: Engine,
    doc: Document,
    frames: Vec<Frame>,
    events: RouterEvents,
    current_path: Option<String>,
}

impl Router {
    /// A router over a document that already contains a root `data-r`
    /// placeholder.
    pub fn new(engine: Engine, doc: Document) -> Self {
        Self {
            routes: Vec::new(),
            engine,
            doc,
            frames: Vec::new(),
            events: RouterEvents::new(),
            current_path: None,
        }
    }

    /// Register a route (builder). The path is normalized; registering the
    /// same path again replaces the earlier route.
    pub fn with_route(mut self, path: impl AsRef<str>, view: impl Into<String>) -> Self {
        let path = paths::normalize(path.as_ref());
        let view = view.into();
        match self.routes.iter_mut().find(|r| r.path == path) {
            Some(route) => route.view = view,
            None => self.routes.push(Route { path, view }),
        }
        self
    }

    /// The routed document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable access to the routed document.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// The path of the last completed navigation, if any.
    pub fn current_path(&self) -> Option<&str> {
        self.current_path.as_deref()
    }

    /// Pending navigation events, for the host to drain.
    pub fn events_mut(&mut self) -> &mut RouterEvents {
        &mut self.events
    }

    /// Perform the initial navigation cycle: the current path if one is
    /// set, the root path otherwise.
    pub async fn init(&mut self) -> Result<String, RouterError> {
        let path = self
            .current_path
            .clone()
            .unwrap_or_else(|| String::from("/"));
        self.navigate(&path).await
    }

    /// Navigate to a path, following guard redirects until a chain mounts
    /// fully. Returns the path actually reached.
    ///
    /// On error the document may hold a partially updated chain; the frame
    /// stack stays consistent with what was actually mounted, so a later
    /// navigation recovers.
    pub async fn navigate(&mut self, path: &str) -> Result<String, RouterError> {
        let mut target = paths::normalize(path);
        loop {
            // The full path must be routable before anything mounts or any
            // event fires; ancestor prefixes are checked as the walk reaches
            // them.
            if !self.routes.iter().any(|r| r.path == target) {
                return Err(RouterError::RouteNotFound { path: target });
            }
            self.events.push(RouterEvent::BeforeViewLoad {
                path: target.clone(),
            });
            match self.mount_chain(&target).await? {
                Some(redirect) => {
                    debug!(from = %target, to = %redirect, "guard redirect");
                    target = paths::normalize(&redirect);
                }
                None => {
                    self.current_path = Some(target.clone());
                    self.events.push(RouterEvent::ViewLoaded {
                        path: target.clone(),
                    });
                    return Ok(target);
                }
            }
        }
    }

    /// Mount the progressive chain for `target`. `Ok(Some(path))` means a
    /// guard redirected; `Ok(None)` means the chain is fully mounted.
    async fn mount_chain(&mut self, target: &str) -> Result<Option<String>, RouterError> {
        let chain = paths::progressive_paths(target);
        let last = chain.len() - 1;

        for (depth, prefix) in chain.iter().enumerate() {
            // An ancestor whose prefix and node survive is reused as-is.
            // The final level always remounts, even on same-path repeats.
            let reusable = depth < last
                && self
                    .frames
                    .get(depth)
                    .is_some_and(|f| f.path == *prefix && self.doc.dom.contains(f.node));
            if reusable {
                continue;
            }

            let view = self
                .routes
                .iter()
                .find(|r| r.path == *prefix)
                .map(|r| r.view.clone())
                .ok_or_else(|| RouterError::RouteNotFound {
                    path: prefix.clone(),
                })?;
            let placeholder = self.placeholder_at(depth, prefix)?;
            self.frames.truncate(depth);

            let req = MountRequest::view(view, placeholder).with_attr(ATTR_ROUTE, prefix.clone());
            match self.engine.mount(&mut self.doc, req).await? {
                Mounted::Redirect(path) => return Ok(Some(path)),
                Mounted::Node(node) => self.frames.push(Frame {
                    path: prefix.clone(),
                    node,
                }),
            }
        }

        // Drop frames deeper than the new chain; their nodes were replaced
        // along with the ancestor that owned them, or belong to an old path.
        self.frames.truncate(chain.len());
        Ok(None)
    }

    /// Where the view for `depth` mounts: the stale view already at that
    /// depth if it is still in the tree, otherwise the first `data-r`
    /// placeholder inside the parent view (or under the body at the root).
    fn placeholder_at(&self, depth: usize, prefix: &str) -> Result<NodeId, RouterError> {
        if let Some(frame) = self.frames.get(depth) {
            if self.doc.dom.contains(frame.node) {
                return Ok(frame.node);
            }
        }
        let scope = match depth.checked_sub(1) {
            Some(parent) => self
                .frames
                .get(parent)
                .map(|f| f.node)
                .unwrap_or_else(|| self.doc.body()),
            None => self.doc.body(),
        };
        self.doc
            .dom
            .query_attr(scope, ATTR_ROUTE)
            .into_iter()
            .next()
            .ok_or_else(|| RouterError::MissingPlaceholder {
                path: prefix.to_string(),
            })
    }
}
