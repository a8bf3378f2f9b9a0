//! Control-surface command channel.

use crossbeam_channel::{Receiver, SendError, Sender, TryRecvError, unbounded};
use sf_ir::{Oscillator, Scale};

/// A parameter change or transport request from the control surface.
///
/// Commands are tagged variants applied atomically by the controller at
/// its synchronization point, never via callback fan-out into the
/// engine. `Play` and `Stop` are edge-triggered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    SetLevel(f64),
    SetPitchRange(u8, u8),
    SetTempo(u16),
    SetOscillator(Oscillator),
    SetScale(Scale),
    Play,
    Stop,
}

/// Channel between control-surface widgets and the playback controller.
///
/// Widgets hold cloned senders; the controller drains the receiver in
/// the control context via [`Controller::process_commands`].
///
/// [`Controller::process_commands`]: crate::Controller::process_commands
pub struct CommandBus {
    sender: Sender<Command>,
    receiver: Receiver<Command>,
}

impl CommandBus {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Get a sender that can be cloned and handed to control-surface
    /// components.
    pub fn sender(&self) -> Sender<Command> {
        self.sender.clone()
    }

    pub fn send(&self, command: Command) -> Result<(), SendError<Command>> {
        self.sender.send(command)
    }

    pub fn try_receive(&self) -> Result<Command, TryRecvError> {
        self.receiver.try_recv()
    }
}

impl Default for CommandBus {
    fn default() -> Self {
        Self::new()
    }
}
