pub mod dispatcher;
pub mod lifecycle;
pub mod sender;
pub mod traits;

pub use dispatcher::{MentionDispatcher, ResourceContent};
pub use lifecycle::{
    ContentChangeEvent, ContentChangeHandler, ContentResource, ContentStatus, EventBus,
    LifecycleEventKind, PreviousRevision,
};
pub use sender::{OutboundNotification, SafeHttpSender};
pub use traits::{
    EndpointDiscovery, FeatureFlag, InlineExecutor, ResourceUrlResolver, SpawnExecutor,
    UnitOfWork, UnitOfWorkExecutor,
};
