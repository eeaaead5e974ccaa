mod framing;

pub use framing::MessageBuffer;
