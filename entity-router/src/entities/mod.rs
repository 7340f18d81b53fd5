//! Entity model, driver capability contracts, and the generic entity-router
//! contract with its per-family specializations.

mod entity;
pub use entity::{
    DefinitionEntity, DefinitionMetadataEntity, Entity, EntityCategory, EntityRef, MessageEntity,
    RoutedEntity, SourceEntity, SourceMetadataEntity,
};

mod drivers;
pub use drivers::{
    CommandResponse, CommandRunDriver, DefinitionMetadataQueryDriver, DefinitionQueryDriver,
    DeleteRequest, DeleteResult, EmptyRequest, EntityDeleteDriver, EntityEmptyDriver,
    EntityExpireAccessDriver, EntityExpireDriver, EntityExpireUpdateDriver, EntityPublishDriver,
    EntityReadDriver, EntitySubscribeDriver, MessageQueryDriver, OperationMode, PublishResult,
    PublishResultKind, SourceMetadataQueryDriver, SourceQueryDriver, SourceQueryResult,
};

mod entity_router;
pub use entity_router::EntityRouter;

mod source_router;
pub use source_router::{SourceMetadataRouter, SourceRouter};

mod definition_router;
pub use definition_router::{DefinitionMetadataRouter, DefinitionRouter};

mod message_router;
pub use message_router::MessageRouter;

mod command_router;
pub use command_router::CommandRouter;
