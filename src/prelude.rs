pub use async_broadcast as broadcast;
pub use async_io::{self, Timer};
pub use async_std::{
    channel::{self, Receiver, Sender},
    io::prelude::BufReadExt,
    io::BufReader,
    path::{Path, PathBuf},
    prelude::{Future, Stream, StreamExt},
    task::{sleep, spawn, JoinHandle},
};
pub use std::{
    pin::{pin, Pin},
    sync::Arc,
    task::{Context, Poll},
    time::{Duration, Instant, SystemTime, SystemTimeError, UNIX_EPOCH},
};
pub use tracing::{debug, error, info, trace, warn};
