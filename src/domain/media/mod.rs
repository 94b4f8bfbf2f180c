//! Media inspection report model.

pub mod audio_stream;
pub mod descriptor;
pub mod video_stream;

pub use audio_stream::AudioStream;
pub use descriptor::{ContainerInfo, MediaDescriptor};
pub use video_stream::VideoStream;
