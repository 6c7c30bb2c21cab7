pub mod domain;
pub mod ports;
pub mod stores;

pub use domain::{
    Credentials, FilePart, NewCourse, NewVideo, Playlist, RegisterProfile, Teacher,
    TeacherSession, Video, VideoUpdate,
};
pub use ports::{ApiGateway, PortError, PortResult, TokenStore};
pub use stores::{
    ErrorKind, OperationError, PlaylistStore, RequestLifecycle, SessionStore, VideoStore,
};
