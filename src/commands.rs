// ⌨️ Commands - mutate the model through its filtered view
//
// Edit, delete and add-session take a 1-based index into the list the user is
// LOOKING AT (the filtered view), never into the unfiltered store. The index is
// resolved to a concrete Tuition first, and the store mutation is done with
// that record.

use std::fmt;
use std::num::NonZeroUsize;
use tracing::{debug, info};

use crate::entities::{Duration, Fee, Session, SessionDate, StudentDescriptor, Subject, Tuition};
use crate::error::{CommandError, TuitionError};
use crate::model::{Model, TuitionFilter};

pub const MESSAGE_ADD_SUCCESS: &str = "New student added: ";
pub const MESSAGE_EDIT_SUCCESS: &str = "Edited Student: ";
pub const MESSAGE_DELETE_SUCCESS: &str = "Deleted Student: ";
pub const MESSAGE_LIST_SUCCESS: &str = "Listed all current students";
pub const MESSAGE_ADD_SESSION_SUCCESS: &str = "New session added: ";

// ============================================================================
// INDEX
// ============================================================================

/// Position in the displayed list, 1-based as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Index(NonZeroUsize);

impl Index {
    /// `None` for zero
    pub fn from_one_based(index: usize) -> Option<Self> {
        NonZeroUsize::new(index).map(Index)
    }

    pub fn from_zero_based(index: usize) -> Self {
        Index(NonZeroUsize::MIN.saturating_add(index))
    }

    pub fn one_based(&self) -> usize {
        self.0.get()
    }

    pub fn zero_based(&self) -> usize {
        self.0.get() - 1
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Look up a displayed index in the model's current view
fn resolve(model: &Model, index: Index) -> Result<Tuition, CommandError> {
    model
        .filtered_view()
        .get(index.zero_based())
        .cloned()
        .ok_or(CommandError::IndexOutOfRange)
}

// ============================================================================
// COMMAND PROTOCOL
// ============================================================================

/// Feedback for the user; the caller re-renders the model's filtered view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>) -> Self {
        CommandResult {
            feedback: feedback.into(),
        }
    }
}

pub trait Command: fmt::Debug {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Run to completion against the model. On error the model is unchanged.
    fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError>;
}

/// Execute with logging of the outcome
pub fn run(command: &dyn Command, model: &mut Model) -> Result<CommandResult, CommandError> {
    match command.execute(model) {
        Ok(result) => {
            info!(command = command.name(), feedback = %result.feedback, "command succeeded");
            Ok(result)
        }
        Err(e) => {
            debug!(command = command.name(), error = %e, "command rejected");
            Err(e)
        }
    }
}

// ============================================================================
// ADD
// ============================================================================

#[derive(Debug, Clone)]
pub struct AddTuitionCommand {
    to_add: Tuition,
}

impl AddTuitionCommand {
    pub fn new(to_add: Tuition) -> Self {
        AddTuitionCommand { to_add }
    }
}

impl Command for AddTuitionCommand {
    fn name(&self) -> &'static str {
        "add"
    }

    fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        if model.has_tuition(&self.to_add) {
            return Err(CommandError::DuplicateTuition);
        }

        model.add_tuition(self.to_add.clone()).map_err(|e| match e {
            TuitionError::DuplicateTuition => CommandError::DuplicateTuition,
            other => CommandError::Model(other),
        })?;
        model.show_all();

        Ok(CommandResult::new(format!("{}{}", MESSAGE_ADD_SUCCESS, self.to_add)))
    }
}

// ============================================================================
// EDIT
// ============================================================================

#[derive(Debug, Clone)]
pub struct EditTuitionCommand {
    index: Index,
    descriptor: StudentDescriptor,
}

impl EditTuitionCommand {
    pub fn new(index: Index, descriptor: StudentDescriptor) -> Self {
        EditTuitionCommand { index, descriptor }
    }
}

impl Command for EditTuitionCommand {
    fn name(&self) -> &'static str {
        "edit"
    }

    fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        if !self.descriptor.is_any_field_edited() {
            return Err(CommandError::NoFieldToEdit);
        }

        let to_edit = resolve(model, self.index)?;
        let edited = to_edit.with_student(self.descriptor.apply(to_edit.student()));

        if !to_edit.is_same_tuition(&edited) && model.has_tuition(&edited) {
            return Err(CommandError::DuplicateTuition);
        }

        let feedback = format!("{}{}", MESSAGE_EDIT_SUCCESS, edited);
        model.set_tuition(&to_edit, edited)?;
        model.show_all();

        Ok(CommandResult::new(feedback))
    }
}

// ============================================================================
// DELETE
// ============================================================================

#[derive(Debug, Clone)]
pub struct DeleteTuitionCommand {
    index: Index,
}

impl DeleteTuitionCommand {
    pub fn new(index: Index) -> Self {
        DeleteTuitionCommand { index }
    }
}

impl Command for DeleteTuitionCommand {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        let target = resolve(model, self.index)?;
        let removed = model.delete_tuition(&target)?;
        Ok(CommandResult::new(format!("{}{}", MESSAGE_DELETE_SUCCESS, removed)))
    }
}

// ============================================================================
// LIST / FIND
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ListTuitionCommand;

impl Command for ListTuitionCommand {
    fn name(&self) -> &'static str {
        "list"
    }

    fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        model.show_all();
        Ok(CommandResult::new(MESSAGE_LIST_SUCCESS))
    }
}

/// Narrow the view to students whose name holds any of the keywords
#[derive(Debug, Clone)]
pub struct FindTuitionCommand {
    filter: TuitionFilter,
}

impl FindTuitionCommand {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FindTuitionCommand {
            filter: TuitionFilter::name_contains(keywords),
        }
    }
}

impl Command for FindTuitionCommand {
    fn name(&self) -> &'static str {
        "find"
    }

    fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        model.update_filter(self.filter.clone());
        let shown = model.filtered_view().len();
        Ok(CommandResult::new(format!("{} students listed!", shown)))
    }
}

// ============================================================================
// ADD SESSION
// ============================================================================

/// Session fields as supplied; any may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionParts {
    pub session_date: Option<SessionDate>,
    pub duration: Option<Duration>,
    pub subject: Option<Subject>,
    pub fee: Option<Fee>,
}

impl SessionParts {
    pub fn build(&self) -> Result<Session, TuitionError> {
        Session::from_parts(
            self.session_date,
            self.duration,
            self.subject.clone(),
            self.fee,
        )
    }
}

impl From<Session> for SessionParts {
    fn from(session: Session) -> Self {
        SessionParts {
            session_date: Some(*session.session_date()),
            duration: Some(session.duration()),
            subject: Some(session.subject().clone()),
            fee: Some(session.fee()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AddSessionCommand {
    index: Index,
    parts: SessionParts,
}

impl AddSessionCommand {
    pub fn new(index: Index, parts: SessionParts) -> Self {
        AddSessionCommand { index, parts }
    }
}

impl Command for AddSessionCommand {
    fn name(&self) -> &'static str {
        "add_session"
    }

    fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        let session = self.parts.build()?;
        let target = resolve(model, self.index)?;

        let mut updated = target.clone();
        updated.add_session(session.clone())?;
        model.set_tuition(&target, updated)?;

        Ok(CommandResult::new(format!(
            "{}{} for {}",
            MESSAGE_ADD_SESSION_SUCCESS,
            session,
            target.student().name()
        )))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Phone;
    use crate::testutil::{alice, bob, carl, session, typical_tuitions, TuitionBuilder, ALICE_NAME};

    fn index(i: usize) -> Index {
        Index::from_one_based(i).unwrap()
    }

    fn typical_model() -> Model {
        Model::with_tuitions(typical_tuitions()).unwrap()
    }

    #[test]
    fn test_index_conversions() {
        assert!(Index::from_one_based(0).is_none());
        let first = index(1);
        assert_eq!(first.zero_based(), 0);
        assert_eq!(first.one_based(), 1);
        assert_eq!(Index::from_zero_based(2), index(3));
    }

    // ------------------------------------------------------------------------
    // add
    // ------------------------------------------------------------------------

    #[test]
    fn test_add_success_resets_filter() {
        let mut model = Model::new();
        model.update_filter(TuitionFilter::name_contains(["Nobody"]));

        let result = AddTuitionCommand::new(alice()).execute(&mut model).unwrap();
        assert_eq!(result.feedback, format!("{}{}", MESSAGE_ADD_SUCCESS, alice()));
        assert_eq!(model.filter(), &TuitionFilter::ShowAll);
        assert_eq!(model.filtered_view().to_vec(), vec![&alice()]);
    }

    #[test]
    fn test_add_duplicate_fails() {
        let mut model = typical_model();
        let same_name = TuitionBuilder::new().with_name(ALICE_NAME).build();

        let err = AddTuitionCommand::new(same_name).execute(&mut model).unwrap_err();
        assert_eq!(err, CommandError::DuplicateTuition);
        assert_eq!(err.to_string(), "This student already exists in the tuition book.");
        assert_eq!(model.tuitions().len(), 3);
    }

    // ------------------------------------------------------------------------
    // edit
    // ------------------------------------------------------------------------

    #[test]
    fn test_edit_all_fields_unfiltered() {
        let mut model = typical_model();
        let replacement = TuitionBuilder::new().build();
        let descriptor = StudentDescriptor::from_student(replacement.student());

        let result = EditTuitionCommand::new(index(1), descriptor)
            .execute(&mut model)
            .unwrap();

        assert_eq!(result.feedback, format!("{}{}", MESSAGE_EDIT_SUCCESS, replacement));
        assert_eq!(model.tuitions().as_slice()[0], replacement);
        assert_eq!(model.tuitions().as_slice()[1], bob());
        assert_eq!(model.tuitions().as_slice()[2], carl());
    }

    #[test]
    fn test_edit_some_fields_last_index() {
        let mut model = typical_model();
        let descriptor = StudentDescriptor::new().with_phone(Phone::new("81112222").unwrap());

        EditTuitionCommand::new(index(3), descriptor)
            .execute(&mut model)
            .unwrap();

        let expected = TuitionBuilder::from_tuition(&carl()).with_phone("81112222").build();
        assert_eq!(model.tuitions().as_slice()[2], expected);
    }

    #[test]
    fn test_edit_without_fields_rejected() {
        let mut model = typical_model();
        let err = EditTuitionCommand::new(index(1), StudentDescriptor::new())
            .execute(&mut model)
            .unwrap_err();
        assert_eq!(err, CommandError::NoFieldToEdit);
        assert_eq!(err.to_string(), "At least one field to edit must be provided.");
    }

    #[test]
    fn test_edit_without_fields_rejected_before_index_check() {
        let mut model = Model::new();
        let err = EditTuitionCommand::new(index(5), StudentDescriptor::new())
            .execute(&mut model)
            .unwrap_err();
        assert_eq!(err, CommandError::NoFieldToEdit);
    }

    #[test]
    fn test_edit_into_existing_student_rejected() {
        let mut model = typical_model();
        let descriptor = StudentDescriptor::from_student(alice().student());
        let err = EditTuitionCommand::new(index(2), descriptor)
            .execute(&mut model)
            .unwrap_err();
        assert_eq!(err, CommandError::DuplicateTuition);
        assert_eq!(model.tuitions().as_slice()[1], bob());
    }

    #[test]
    fn test_edit_into_existing_student_rejected_through_filter() {
        let mut model = typical_model();
        model.update_filter(TuitionFilter::name_contains(["Alice"]));

        let descriptor = StudentDescriptor::from_student(bob().student());
        let err = EditTuitionCommand::new(index(1), descriptor)
            .execute(&mut model)
            .unwrap_err();
        assert_eq!(err, CommandError::DuplicateTuition);
    }

    #[test]
    fn test_edit_index_out_of_range() {
        let mut model = typical_model();
        let descriptor = StudentDescriptor::new().with_phone(Phone::new("81112222").unwrap());
        let err = EditTuitionCommand::new(index(4), descriptor)
            .execute(&mut model)
            .unwrap_err();
        assert_eq!(err, CommandError::IndexOutOfRange);
    }

    #[test]
    fn test_edit_index_checked_against_filtered_view() {
        let mut model = typical_model();
        model.update_filter(TuitionFilter::name_contains(["Bob"]));

        // Index 2 exists in the store but not in the view
        let descriptor = StudentDescriptor::new().with_phone(Phone::new("81112222").unwrap());
        let err = EditTuitionCommand::new(index(2), descriptor)
            .execute(&mut model)
            .unwrap_err();
        assert_eq!(err, CommandError::IndexOutOfRange);
    }

    #[test]
    fn test_edit_through_filter_targets_correct_record() {
        let mut model = Model::new();
        model.add_tuition(bob()).unwrap();
        model.add_tuition(alice()).unwrap();
        model.update_filter(TuitionFilter::name_contains(["Alice"]));
        assert_eq!(model.filtered_view().len(), 1);

        let descriptor = StudentDescriptor::new().with_phone(Phone::new("80001111").unwrap());
        EditTuitionCommand::new(index(1), descriptor)
            .execute(&mut model)
            .unwrap();

        let store = model.tuitions().as_slice();
        assert_eq!(store[0], bob());
        assert_eq!(store[1].student().name().as_str(), ALICE_NAME);
        assert_eq!(store[1].student().phone().as_str(), "80001111");
        assert_eq!(model.filter(), &TuitionFilter::ShowAll);
    }

    #[test]
    fn test_edit_keeps_sessions() {
        let with_session = TuitionBuilder::from_tuition(&alice())
            .with_session("2024-01-01", "10:00", "Math")
            .build();
        let mut model = Model::with_tuitions(vec![with_session]).unwrap();

        let descriptor = StudentDescriptor::new().with_phone(Phone::new("80001111").unwrap());
        EditTuitionCommand::new(index(1), descriptor)
            .execute(&mut model)
            .unwrap();
        assert_eq!(model.tuitions().as_slice()[0].sessions().len(), 1);
    }

    // ------------------------------------------------------------------------
    // delete
    // ------------------------------------------------------------------------

    #[test]
    fn test_delete_unfiltered() {
        let mut model = typical_model();
        let result = DeleteTuitionCommand::new(index(2)).execute(&mut model).unwrap();
        assert_eq!(result.feedback, format!("{}{}", MESSAGE_DELETE_SUCCESS, bob()));
        assert_eq!(model.tuitions().as_slice(), &[alice(), carl()]);
    }

    #[test]
    fn test_delete_through_filter() {
        let mut model = typical_model();
        model.update_filter(TuitionFilter::name_contains(["Carl"]));

        DeleteTuitionCommand::new(index(1)).execute(&mut model).unwrap();
        assert_eq!(model.tuitions().as_slice(), &[alice(), bob()]);
        // Filter stays; nothing left to show
        assert!(model.filtered_view().is_empty());
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut model = typical_model();
        model.update_filter(TuitionFilter::name_contains(["Carl"]));
        let err = DeleteTuitionCommand::new(index(2)).execute(&mut model).unwrap_err();
        assert_eq!(err, CommandError::IndexOutOfRange);
        assert_eq!(model.tuitions().len(), 3);
    }

    // ------------------------------------------------------------------------
    // list / find
    // ------------------------------------------------------------------------

    #[test]
    fn test_list_resets_filter() {
        let mut model = typical_model();
        model.update_filter(TuitionFilter::name_contains(["Bob"]));
        let result = ListTuitionCommand.execute(&mut model).unwrap();
        assert_eq!(result.feedback, MESSAGE_LIST_SUCCESS);
        assert_eq!(model.filtered_view().len(), 3);
    }

    #[test]
    fn test_find_narrows_view() {
        let mut model = typical_model();
        let result = FindTuitionCommand::new(["kurz", "pauline"])
            .execute(&mut model)
            .unwrap();
        assert_eq!(result.feedback, "2 students listed!");
        assert_eq!(model.filtered_view().to_vec(), vec![&alice(), &carl()]);

        let none = FindTuitionCommand::new(["Zed"]).execute(&mut model).unwrap();
        assert_eq!(none.feedback, "0 students listed!");
    }

    // ------------------------------------------------------------------------
    // add session
    // ------------------------------------------------------------------------

    #[test]
    fn test_add_session_through_filter() {
        let mut model = typical_model();
        model.update_filter(TuitionFilter::name_contains(["Bob"]));

        let parts = SessionParts::from(session("2024-01-01", "10:00", "Math"));
        AddSessionCommand::new(index(1), parts).execute(&mut model).unwrap();

        let store = model.tuitions().as_slice();
        assert!(store[0].sessions().is_empty());
        assert_eq!(store[1].sessions().len(), 1);
        assert!(store[2].sessions().is_empty());
        // Filter untouched
        assert_eq!(model.filtered_view().len(), 1);
    }

    #[test]
    fn test_add_session_duplicate_time_rejected() {
        let mut model = typical_model();
        let first = SessionParts::from(session("2024-01-01", "10:00", "Math"));
        let clash = SessionParts::from(session("2024-01-01", "10:00", "Science"));

        AddSessionCommand::new(index(1), first).execute(&mut model).unwrap();
        let err = AddSessionCommand::new(index(1), clash)
            .execute(&mut model)
            .unwrap_err();
        assert_eq!(err, CommandError::Model(TuitionError::DuplicateSession));
        assert_eq!(model.tuitions().as_slice()[0].sessions().len(), 1);
    }

    #[test]
    fn test_add_session_missing_field() {
        let mut model = typical_model();
        let mut parts = SessionParts::from(session("2024-01-01", "10:00", "Math"));
        parts.fee = None;

        let err = AddSessionCommand::new(index(1), parts)
            .execute(&mut model)
            .unwrap_err();
        assert_eq!(err, CommandError::Model(TuitionError::MissingField("fee")));
    }

    #[test]
    fn test_add_session_out_of_range() {
        let mut model = Model::new();
        let parts = SessionParts::from(session("2024-01-01", "10:00", "Math"));
        let err = AddSessionCommand::new(index(1), parts)
            .execute(&mut model)
            .unwrap_err();
        assert_eq!(err, CommandError::IndexOutOfRange);
    }

    // ------------------------------------------------------------------------
    // scenarios
    // ------------------------------------------------------------------------

    #[test]
    fn test_add_edit_delete_lifecycle() {
        let mut model = Model::new();

        let alice_first = TuitionBuilder::new().with_name("Alice").build();
        run(&AddTuitionCommand::new(alice_first), &mut model).unwrap();
        assert_eq!(model.tuitions().len(), 1);

        let alice_again = TuitionBuilder::new()
            .with_name("Alice")
            .with_phone("90001234")
            .build();
        let err = run(&AddTuitionCommand::new(alice_again), &mut model).unwrap_err();
        assert_eq!(err, CommandError::DuplicateTuition);
        assert_eq!(model.tuitions().len(), 1);

        let new_phone = Phone::new("81234567").unwrap();
        let descriptor = StudentDescriptor::new().with_phone(new_phone.clone());
        run(&EditTuitionCommand::new(index(1), descriptor), &mut model).unwrap();
        assert_eq!(model.tuitions().len(), 1);
        let stored = model.tuitions().as_slice()[0].student();
        assert_eq!(stored.phone(), &new_phone);
        assert_eq!(stored.name().as_str(), "Alice");

        run(&DeleteTuitionCommand::new(index(1)), &mut model).unwrap();
        assert!(model.tuitions().is_empty());

        let err = run(&DeleteTuitionCommand::new(index(1)), &mut model).unwrap_err();
        assert_eq!(err, CommandError::IndexOutOfRange);
    }
}
