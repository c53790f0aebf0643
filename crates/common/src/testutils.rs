use once_cell::sync::Lazy;
use std::io;
use std::sync::mpsc::TryRecvError;
use std::sync::{mpsc, Arc, Mutex};

/// Serializes tests which mutate process-wide state (ie environment variables)
pub static TEST_MUTEX: Lazy<Arc<Mutex<bool>>> = Lazy::new(|| Arc::new(Mutex::new(true)));

/// Wraps a byte vector channel sender
pub struct ChannelWriter {
    /// Byte vector channel sender
    pub channel_sender: mpsc::Sender<Vec<u8>>,
}

impl io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.channel_sender
            .send(buf.to_vec())
            .map(|_| buf.len())
            .map_err(io::Error::other)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Receive all pending channel bytes vectors and flatten result
///
/// # Arguments
///
/// * `channel_receiver` - A byte vector channel receiver
///
/// # Returns
///
/// A byte vector of the received channel data (all data flattened to a single byte vector)
///
pub fn gather_rcvd_bytearr_channel_data(channel_receiver: &mpsc::Receiver<Vec<u8>>) -> Vec<u8> {
    let mut rcvd_data: Vec<u8> = vec![];
    loop {
        match channel_receiver.try_recv() {
            Ok(mut data) => rcvd_data.append(&mut data),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        }
    }
    rcvd_data
}

/// Receive all pending channel data as (lossy) UTF-8 text
pub fn gather_rcvd_text_channel_data(channel_receiver: &mpsc::Receiver<Vec<u8>>) -> String {
    String::from_utf8_lossy(&gather_rcvd_bytearr_channel_data(channel_receiver)).to_string()
}
