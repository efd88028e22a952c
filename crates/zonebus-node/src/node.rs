use tracing::debug;
use zonebus_bus::BusSlave;

use crate::action::CommandAction;
use crate::status::Status;

/// Transient execution state. The node holds no persistent mode beyond the
/// status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    Idle,
    Executing,
}

/// A peripheral node: bus slave at a fixed address, recognizing exactly one
/// command code.
///
/// The status register has a single writer (command dispatch) and is served
/// verbatim, unmodified, on every bus read. A command arriving while the
/// node is executing is rejected without touching status or action; external
/// re-entrancy is already unrepresentable because the bus holds the only
/// mutable reference, so the guard covers re-entry from within the action.
pub struct PeripheralNode<A> {
    recognized: u8,
    status: Status,
    state: NodeState,
    action: A,
}

impl<A: CommandAction> PeripheralNode<A> {
    /// Create a node that executes `action` when it receives `recognized`.
    pub fn new(recognized: u8, action: A) -> Self {
        Self {
            recognized,
            status: Status::default(),
            state: NodeState::Idle,
            action,
        }
    }

    /// Current value of the status register.
    pub fn status(&self) -> Status {
        self.status
    }

    /// The single command code this node executes.
    pub fn recognized_command(&self) -> u8 {
        self.recognized
    }
}

impl<A: CommandAction> BusSlave for PeripheralNode<A> {
    fn on_receive(&mut self, byte: u8) {
        if self.state == NodeState::Executing {
            debug!(byte, "command rejected: node is executing");
            return;
        }

        if byte == self.recognized {
            self.state = NodeState::Executing;
            self.action.execute();
            self.state = NodeState::Idle;
            self.status = Status::Ok;
            debug!(byte, "command executed");
        } else {
            self.status = Status::UnknownCommand;
            debug!(byte, "unrecognized command");
        }
    }

    fn on_request(&mut self) -> u8 {
        self.status.as_byte()
    }
}
