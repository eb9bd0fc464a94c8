// Replies from the query worker are addressed to a component. Within that component, the ticket
// number tells which request the reply belongs to, so replies meant for a modal that has already
// been replaced are never mistaken for replies to the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompID {
    None,
    ImportModal,
}
