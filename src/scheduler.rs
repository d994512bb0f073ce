use crate::command::EarlyCommand;
use std::cmp::Ordering;
use std::rc::Rc;

/// Which end of the priority scale runs first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityOrder {
    /// Larger priority values run first.
    #[default]
    HighestFirst,
    /// Smaller priority values run first.
    LowestFirst,
}

impl PriorityOrder {
    fn compare(self, a: &EarlyCommand, b: &EarlyCommand) -> Ordering {
        match self {
            PriorityOrder::HighestFirst => b.priority.cmp(&a.priority),
            PriorityOrder::LowestFirst => a.priority.cmp(&b.priority),
        }
    }
}

/// Ordered list of early commands.
///
/// The list is sorted once, before the first loop iteration. Commands registered
/// after that are appended behind the sorted ones and stay there.
#[derive(Debug, Default)]
pub struct Scheduler {
    order: PriorityOrder,
    commands: Vec<Rc<EarlyCommand>>,
}

impl Scheduler {
    pub fn new(order: PriorityOrder) -> Self {
        Self {
            order,
            commands: Vec::new(),
        }
    }

    pub fn register(&mut self, command: EarlyCommand) {
        self.commands.push(Rc::new(command));
    }

    /// Stable sort by priority according to the configured [`PriorityOrder`].
    pub fn sort(&mut self) {
        let order = self.order;
        self.commands.sort_by(|a, b| order.compare(a, b));
    }

    pub fn order(&self) -> PriorityOrder {
        self.order
    }

    /// The commands in run order, detached from the scheduler so that they can be
    /// run against the shell that owns it.
    pub fn snapshot(&self) -> Vec<Rc<EarlyCommand>> {
        self.commands.clone()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn early(name: &str, priority: i32) -> EarlyCommand {
        EarlyCommand::new(name, priority, |_| Ok(()))
    }

    fn names(scheduler: &Scheduler) -> Vec<String> {
        scheduler.snapshot().iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_highest_priority_first() {
        let mut scheduler = Scheduler::new(PriorityOrder::HighestFirst);
        scheduler.register(early("one", 1));
        scheduler.register(early("five", 5));
        scheduler.register(early("three", 3));
        scheduler.sort();

        assert_eq!(names(&scheduler), vec!["five", "three", "one"]);
    }

    #[test]
    fn test_lowest_priority_first() {
        let mut scheduler = Scheduler::new(PriorityOrder::LowestFirst);
        scheduler.register(early("one", 1));
        scheduler.register(early("five", 5));
        scheduler.register(early("three", 3));
        scheduler.sort();

        assert_eq!(names(&scheduler), vec!["one", "three", "five"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut scheduler = Scheduler::default();
        scheduler.register(early("a", 2));
        scheduler.register(early("b", 7));
        scheduler.register(early("c", 2));
        scheduler.register(early("d", 7));
        scheduler.sort();

        assert_eq!(names(&scheduler), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_late_registration_is_not_resorted() {
        let mut scheduler = Scheduler::default();
        scheduler.register(early("low", 1));
        scheduler.register(early("mid", 5));
        scheduler.sort();
        scheduler.register(early("high", 10));

        assert_eq!(names(&scheduler), vec!["mid", "low", "high"]);
    }

    #[test]
    fn test_order_and_size() {
        let mut scheduler = Scheduler::new(PriorityOrder::LowestFirst);
        assert_eq!(scheduler.order(), PriorityOrder::LowestFirst);
        assert!(scheduler.is_empty());

        scheduler.register(early("only", 0));
        assert_eq!(scheduler.len(), 1);
        assert!(!scheduler.is_empty());
        assert_eq!(Scheduler::default().order(), PriorityOrder::HighestFirst);
    }
}
