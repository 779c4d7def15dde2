//! Session - owns one field and notifies observers when it changes.

use crate::schema::{ConfigError, FieldConfig};

use super::{CellCensus, CodecError, Field, LifeEngine, codec};

/// Errors from session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Field has size {actual} but the session is configured for {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("Rejected encoded field: {0}")]
    Format(#[from] CodecError),
}

/// Holds the current field and reports every replacement to its observers.
///
/// Observers are registered per session and run in registration order. All
/// operations replace the field value wholesale; the previous generation is
/// never mutated in place, so an observer always sees a complete new state.
/// A rejected `load` or `install` leaves the field untouched and notifies
/// nobody.
pub struct Session {
    field: Field,
    engine: LifeEngine,
    observers: Vec<Box<dyn FnMut(&Field)>>,
    ticks: u64,
}

impl Session {
    /// Create a session holding an all-dead field.
    pub fn new(config: FieldConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            field: Field::empty(config.size),
            engine: LifeEngine::new(config),
            observers: Vec::new(),
            ticks: 0,
        })
    }

    /// The current field.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Generations advanced since the session was created.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Register an observer for field replacements.
    pub fn observe<F>(&mut self, observer: F)
    where
        F: FnMut(&Field) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer(&self.field);
        }
    }

    /// Replace the field with an all-dead one.
    pub fn clear(&mut self) {
        self.field = Field::empty(self.field.size());
        self.notify();
    }

    /// Replace the field with one produced by the given constructor.
    pub fn reset_with<F>(&mut self, make: F) -> Result<(), SessionError>
    where
        F: FnOnce(usize) -> Field,
    {
        let field = make(self.field.size());
        self.install(field)
    }

    /// Install a field of matching size.
    pub fn install(&mut self, field: Field) -> Result<(), SessionError> {
        if field.size() != self.field.size() {
            return Err(SessionError::SizeMismatch {
                expected: self.field.size(),
                actual: field.size(),
            });
        }
        self.field = field;
        self.notify();
        Ok(())
    }

    /// Advance one generation.
    pub fn tick(&mut self) {
        self.engine.step(&mut self.field);
        self.ticks += 1;
        self.notify();
    }

    /// Population snapshot of the current field.
    pub fn census(&self) -> CellCensus {
        self.field.census()
    }

    /// Decode and install an encoded field.
    pub fn load(&mut self, encoded: &str) -> Result<(), SessionError> {
        let field = codec::decode(encoded, self.field.size())?;
        self.field = field;
        self.notify();
        Ok(())
    }

    /// Encode the current field.
    pub fn save(&self) -> String {
        codec::encode(&self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session(size: usize) -> Session {
        Session::new(FieldConfig { size }).unwrap()
    }

    #[test]
    fn test_new_session_is_all_dead() {
        let session = session(6);
        let census = session.census();
        assert_eq!(census.total, 36);
        assert_eq!(census.alive, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Session::new(FieldConfig { size: 0 }).is_err());
    }

    #[test]
    fn test_tick_notifies_with_new_state() {
        let mut session = session(4);
        let mut block = Field::empty(4);
        block.set(1, 1, true);
        block.set(1, 2, true);
        block.set(2, 1, true);
        block.set(2, 2, true);
        session.install(block).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.observe(move |field| sink.borrow_mut().push(field.census().alive));

        session.tick();
        session.tick();

        assert_eq!(*seen.borrow(), vec![4, 4]);
        assert_eq!(session.ticks(), 2);
    }

    #[test]
    fn test_observers_run_in_registration_order() {
        let mut session = session(3);
        let order = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&order);
        session.observe(move |_| first.borrow_mut().push(1));
        let second = Rc::clone(&order);
        session.observe(move |_| second.borrow_mut().push(2));

        session.tick();
        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_clear_replaces_with_all_dead() {
        let mut session = session(4);
        let mut field = Field::empty(4);
        field.set(0, 0, true);
        session.install(field).unwrap();
        assert_eq!(session.census().alive, 1);

        session.clear();
        assert_eq!(session.census().alive, 0);
    }

    #[test]
    fn test_install_rejects_size_mismatch() {
        let mut session = session(4);
        let err = session.install(Field::empty(5)).unwrap_err();
        assert!(matches!(
            err,
            SessionError::SizeMismatch {
                expected: 4,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_reset_with_generator() {
        let mut session = session(5);
        session
            .reset_with(|size| {
                let mut field = Field::empty(size);
                field.set(2, 2, true);
                field
            })
            .unwrap();
        assert!(session.field().get(2, 2));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut session = session(5);
        let mut field = Field::empty(5);
        field.set(0, 0, true);
        field.set(2, 3, true);
        field.set(4, 4, true);
        session.install(field.clone()).unwrap();

        let saved = session.save();
        session.clear();
        session.load(&saved).unwrap();
        assert_eq!(session.field(), &field);
    }

    #[test]
    fn test_rejected_load_leaves_field_and_observers_silent() {
        let mut session = session(4);
        let mut field = Field::empty(4);
        field.set(1, 1, true);
        session.install(field.clone()).unwrap();

        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        session.observe(move |_| *sink.borrow_mut() += 1);

        assert!(session.load("definitely not base64").is_err());
        // Too few bits for a 4x4 field.
        assert!(session.load("AA==").is_err());

        assert_eq!(*calls.borrow(), 0);
        assert_eq!(session.field(), &field);
    }

    #[test]
    fn test_load_notifies_on_success() {
        let mut session = session(2);
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        session.observe(move |_| *sink.borrow_mut() += 1);

        session.load("AA==").unwrap();
        assert_eq!(*calls.borrow(), 1);
    }
}
