//! # Component Lifecycle
//!
//! A [`Component`] is an object with three lifecycle hooks and a pure render
//! function. [`ComponentHost`] drives one component through its lifecycle and
//! enforces call order:
//!
//! ```text
//! Created --mount--> Mounted --update--> Mounted --unmount--> Unmounted
//! ```
//!
//! Rendering happens before `on_mount` on the first pass, so the initial tree
//! reflects the component's construction-time state. Subsequent updates call
//! `on_update` first and render afterwards.
//!
//! Dropping a mounted host unmounts the component, so pending work owned by
//! the component is always torn down.

use thiserror::Error;
use tracing::debug;

use crate::Element;

/// A stateful UI component driven by a host.
pub trait Component {
    /// Configuration supplied by the caller on every update.
    type Args;

    /// Called once, right after the first render.
    fn on_mount(&mut self);

    /// Called whenever the caller supplies a new configuration.
    fn on_update(&mut self, args: Self::Args);

    /// Called once when the component is torn down. Must cancel any pending
    /// deferred work.
    fn on_unmount(&mut self);

    /// Describes the current visual output. Must not have side effects.
    fn render(&self) -> Element;
}

/// Where a hosted component is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Constructed but never rendered.
    Created,
    /// Rendered at least once and not yet torn down.
    Mounted,
    /// Torn down; no further hooks will run.
    Unmounted,
}

/// Lifecycle calls made out of order.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("component is already mounted")]
    AlreadyMounted,
    #[error("component must be mounted before it can {0}")]
    NotMounted(&'static str),
    #[error("component has been unmounted")]
    Unmounted,
}

/// Owns a component and enforces its lifecycle.
pub struct ComponentHost<C: Component> {
    component: C,
    phase: LifecyclePhase,
}

impl<C: Component> ComponentHost<C> {
    pub fn new(component: C) -> Self {
        Self {
            component,
            phase: LifecyclePhase::Created,
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    /// Renders the first tree, then runs `on_mount`.
    pub fn mount(&mut self) -> Result<Element, LifecycleError> {
        match self.phase {
            LifecyclePhase::Created => {}
            LifecyclePhase::Mounted => return Err(LifecycleError::AlreadyMounted),
            LifecyclePhase::Unmounted => return Err(LifecycleError::Unmounted),
        }
        let tree = self.component.render();
        self.component.on_mount();
        self.phase = LifecyclePhase::Mounted;
        debug!("component mounted");
        Ok(tree)
    }

    /// Hands new configuration to the component and re-renders it.
    pub fn update(&mut self, args: C::Args) -> Result<Element, LifecycleError> {
        self.ensure_mounted("update")?;
        self.component.on_update(args);
        Ok(self.component.render())
    }

    /// Re-renders without changing configuration, e.g. after a scheduled
    /// callback changed internal state.
    pub fn render(&self) -> Result<Element, LifecycleError> {
        self.ensure_mounted("render")?;
        Ok(self.component.render())
    }

    /// Tears the component down.
    pub fn unmount(&mut self) -> Result<(), LifecycleError> {
        self.ensure_mounted("unmount")?;
        self.component.on_unmount();
        self.phase = LifecyclePhase::Unmounted;
        debug!("component unmounted");
        Ok(())
    }

    fn ensure_mounted(&self, action: &'static str) -> Result<(), LifecycleError> {
        match self.phase {
            LifecyclePhase::Mounted => Ok(()),
            LifecyclePhase::Created => Err(LifecycleError::NotMounted(action)),
            LifecyclePhase::Unmounted => Err(LifecycleError::Unmounted),
        }
    }
}

impl<C: Component> Drop for ComponentHost<C> {
    fn drop(&mut self) {
        if self.phase == LifecyclePhase::Mounted {
            self.component.on_unmount();
            self.phase = LifecyclePhase::Unmounted;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::Tag;

    #[derive(Default)]
    struct Recording {
        calls: Arc<Mutex<Vec<String>>>,
        value: u32,
    }

    impl Component for Recording {
        type Args = u32;

        fn on_mount(&mut self) {
            self.calls.lock().push("mount".to_string());
        }

        fn on_update(&mut self, args: u32) {
            self.value = args;
            self.calls.lock().push(format!("update {args}"));
        }

        fn on_unmount(&mut self) {
            self.calls.lock().push("unmount".to_string());
        }

        fn render(&self) -> Element {
            self.calls.lock().push(format!("render {}", self.value));
            Element::new(Tag::Text).text(self.value.to_string())
        }
    }

    #[test]
    fn hooks_run_in_lifecycle_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut host = ComponentHost::new(Recording {
            calls: calls.clone(),
            value: 1,
        });
        assert_eq!(host.phase(), LifecyclePhase::Created);

        let first = host.mount().expect("first mount succeeds");
        assert_eq!(first.text_content(), Some("1"));
        let second = host.update(7).expect("update while mounted succeeds");
        assert_eq!(second.text_content(), Some("7"));
        host.unmount().expect("unmount while mounted succeeds");

        assert_eq!(host.phase(), LifecyclePhase::Unmounted);
        assert_eq!(
            *calls.lock(),
            ["render 1", "mount", "update 7", "render 7", "unmount"]
        );
    }

    #[test]
    fn out_of_order_calls_are_rejected() {
        let mut host = ComponentHost::new(Recording::default());
        assert_eq!(host.update(1), Err(LifecycleError::NotMounted("update")));
        assert_eq!(host.render(), Err(LifecycleError::NotMounted("render")));
        assert_eq!(host.unmount(), Err(LifecycleError::NotMounted("unmount")));

        host.mount().expect("first mount succeeds");
        assert_eq!(host.mount(), Err(LifecycleError::AlreadyMounted));

        host.unmount().expect("unmount succeeds");
        assert_eq!(host.update(2), Err(LifecycleError::Unmounted));
        assert_eq!(host.mount(), Err(LifecycleError::Unmounted));
        assert_eq!(host.unmount(), Err(LifecycleError::Unmounted));
    }

    #[test]
    fn dropping_a_mounted_host_unmounts() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        {
            let mut host = ComponentHost::new(Recording {
                calls: calls.clone(),
                value: 0,
            });
            host.mount().expect("first mount succeeds");
        }
        assert_eq!(calls.lock().last().map(String::as_str), Some("unmount"));
    }

    #[test]
    fn dropping_an_unmounted_host_does_not_unmount_twice() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        {
            let mut host = ComponentHost::new(Recording {
                calls: calls.clone(),
                value: 0,
            });
            host.mount().expect("first mount succeeds");
            host.unmount().expect("unmount succeeds");
        }
        let unmounts = calls.lock().iter().filter(|call| *call == "unmount").count();
        assert_eq!(unmounts, 1);
    }
}
