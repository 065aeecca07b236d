//! Message processing loop
//!
//! Runs a message through `update`, dispatches the resulting actions, and
//! follows up with any chained message until the chain ends.

use linkpeek_core::prelude::*;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::services::Collaborators;
use crate::state::PreviewState;

/// Upper bound on chained follow-up messages for one input
const MAX_CHAIN: usize = 16;

/// Process a message through the TEA update loop
pub fn process_message(state: &mut PreviewState, message: Message, collaborators: &Collaborators) {
    let mut msg = Some(message);
    let mut steps = 0;

    while let Some(m) = msg {
        steps += 1;
        if steps > MAX_CHAIN {
            error!("Message chain exceeded {} steps; dropping {:?}", MAX_CHAIN, m);
            break;
        }

        let result = handler::update(state, m);
        for action in result.actions {
            handle_action(action, collaborators);
        }
        msg = result.message;
    }
}
