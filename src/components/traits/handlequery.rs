use crate::{action::Action, compid::CompID, queryworker::query::ResponseType};

pub trait HandleQuery {
    fn handle_query(&mut self, dest: CompID, ticket: usize, res: ResponseType) -> Option<Action>;
}
