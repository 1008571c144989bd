//! Component trait

/// Marker trait for components
///
/// Components are plain data attached to entities, at most one instance per
/// (entity, type). Opt in with an empty impl:
///
/// ```
/// use scene_engine::ecs::Component;
///
/// struct Health(u32);
/// impl Component for Health {}
/// ```
pub trait Component: 'static + Send + Sync {}

/// Readable name for a component type, used in errors and logs
pub(crate) fn component_name<T: Component>() -> &'static str {
    std::any::type_name::<T>()
}
