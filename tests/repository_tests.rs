//! Tests for Repository
//!
//! These tests verify:
//! - Round trips for every entity kind
//! - Key uniqueness and upsert semantics
//! - Update / delete / get error paths
//! - Index reflects the table after every mutation
//! - Search semantics
//! - Strict schema on load
//! - Invalid values rejected before anything is written

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use checkmygrade::entity::{Course, Entity, Grade, Professor, Role, Student, User};
use checkmygrade::ledger::GradeEntry;
use checkmygrade::repository::Repository;
use checkmygrade::GradeError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().to_path_buf();
    (temp_dir, path)
}

fn open<T: Entity>(dir: &PathBuf, name: &str) -> Repository<T> {
    Repository::open(dir.join(name)).unwrap()
}

fn keys<T: Entity>(repo: &Repository<T>) -> Vec<String> {
    repo.keys().map(str::to_string).collect()
}

// =============================================================================
// Open / Round Trip Tests
// =============================================================================

#[test]
fn test_open_missing_table_is_empty() {
    let (_temp, dir) = setup_temp_dir();

    let repo: Repository<Student> = open(&dir, "student.csv");

    assert!(repo.is_empty());
    assert!(!repo.path().exists());
}

#[test]
fn test_student_roundtrip_through_fresh_repository() {
    let (_temp, dir) = setup_temp_dir();
    let mut repo: Repository<Student> = open(&dir, "student.csv");

    let mut graded = Student::new("Ada", "Lovelace", "a@x.com");
    graded.add_course("CS101").unwrap();
    graded.add_course("CS102").unwrap();
    graded.assign_grade("CS102", "B", "85").unwrap();

    let mut ungraded = Student::new("Alan", "Turing", "b@x.com");
    ungraded.add_course("CS101").unwrap();

    repo.add(graded.clone()).unwrap();
    repo.add(ungraded.clone()).unwrap();
    repo.add(Student::new("Grace", "Hopper", "c@x.com")).unwrap();

    let reopened: Repository<Student> = open(&dir, "student.csv");
    assert_eq!(reopened.len(), 3);
    assert_eq!(reopened.get("a@x.com").unwrap(), &graded);
    assert_eq!(reopened.get("b@x.com").unwrap(), &ungraded);
    assert!(reopened.get("c@x.com").unwrap().ledger().is_empty());
}

#[test]
fn test_other_entities_roundtrip() {
    let (_temp, dir) = setup_temp_dir();

    let mut professors: Repository<Professor> = open(&dir, "professor.csv");
    let mut prof = Professor::new("Barbara Liskov", "bl@x.com", "Full");
    prof.add_course("CS101").unwrap();
    prof.add_course("CS202").unwrap();
    professors.add(prof.clone()).unwrap();

    let mut courses: Repository<Course> = open(&dir, "course.csv");
    let course = Course::new("CS101", 3, "Intro", "Basics, with a comma");
    courses.add(course.clone()).unwrap();

    let mut grades: Repository<Grade> = open(&dir, "grades.csv");
    let grade = Grade::new("A", "A", "90-100");
    grades.add(grade.clone()).unwrap();

    let mut users: Repository<User> = open(&dir, "login.csv");
    let user = User::with_password("bl@x.com", "secret", Role::Professor);
    users.add(user.clone()).unwrap();

    assert_eq!(open::<Professor>(&dir, "professor.csv").get("bl@x.com").unwrap(), &prof);
    assert_eq!(open::<Course>(&dir, "course.csv").get("CS101").unwrap(), &course);
    assert_eq!(open::<Grade>(&dir, "grades.csv").get("A").unwrap(), &grade);
    assert_eq!(open::<User>(&dir, "login.csv").get("bl@x.com").unwrap(), &user);
}

#[test]
fn test_load_all_matches_index() {
    let (_temp, dir) = setup_temp_dir();
    let mut repo: Repository<Grade> = open(&dir, "grades.csv");
    repo.add(Grade::new("A", "A", "90-100")).unwrap();
    repo.add(Grade::new("B", "B", "80-89")).unwrap();

    let loaded = repo.load_all().unwrap();
    let index = repo.index();

    assert_eq!(loaded.len(), index.len());
    for grade in &loaded {
        assert_eq!(index.get(grade.key()), Some(&grade));
    }
}

// =============================================================================
// Key Uniqueness Tests
// =============================================================================

#[test]
fn test_add_same_key_twice_keeps_second() {
    let (_temp, dir) = setup_temp_dir();
    let mut repo: Repository<Course> = open(&dir, "course.csv");

    repo.add(Course::new("CS101", 3, "Intro", "first")).unwrap();
    repo.add(Course::new("CS101", 4, "Intro II", "second")).unwrap();

    assert_eq!(repo.len(), 1);
    let course = repo.get("CS101").unwrap();
    assert_eq!(course.credits, 4);
    assert_eq!(course.course_desc, "second");

    let reopened: Repository<Course> = open(&dir, "course.csv");
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.get("CS101").unwrap().credits, 4);
}

#[test]
fn test_add_existing_key_keeps_position() {
    let (_temp, dir) = setup_temp_dir();
    let mut repo: Repository<Grade> = open(&dir, "grades.csv");
    repo.add(Grade::new("A", "A", "90-100")).unwrap();
    repo.add(Grade::new("B", "B", "80-89")).unwrap();

    repo.add(Grade::new("A", "A+", "95-100")).unwrap();

    assert_eq!(keys(&repo), vec!["A", "B"]);
}

#[test]
fn test_duplicate_keys_on_disk_collapse() {
    let (_temp, dir) = setup_temp_dir();
    fs::write(
        dir.join("grades.csv"),
        "grade_id,grade,marks_range\nA,A,90-100\nB,B,80-89\nA,A+,95-100\n",
    )
    .unwrap();

    let repo: Repository<Grade> = open(&dir, "grades.csv");

    assert_eq!(keys(&repo), vec!["A", "B"]);
    assert_eq!(repo.get("A").unwrap().grade, "A+");
}

// =============================================================================
// Update / Delete / Get Tests
// =============================================================================

#[test]
fn test_update_moves_record_last() {
    let (_temp, dir) = setup_temp_dir();
    let mut repo: Repository<Student> = open(&dir, "student.csv");
    repo.add(Student::new("A", "One", "a@x.com")).unwrap();
    repo.add(Student::new("B", "Two", "b@x.com")).unwrap();

    let mut student = repo.get("a@x.com").unwrap().clone();
    student.first_name = "Updated".to_string();
    repo.update(student).unwrap();

    assert_eq!(keys(&repo), vec!["b@x.com", "a@x.com"]);
    assert_eq!(repo.get("a@x.com").unwrap().first_name, "Updated");
}

#[test]
fn test_update_unknown_key_is_not_found() {
    let (_temp, dir) = setup_temp_dir();
    let mut repo: Repository<Student> = open(&dir, "student.csv");

    let result = repo.update(Student::new("A", "One", "ghost@x.com"));

    assert!(matches!(result, Err(GradeError::NotFound { .. })));
    assert!(!repo.path().exists());
}

#[test]
fn test_delete_removes_record() {
    let (_temp, dir) = setup_temp_dir();
    let mut repo: Repository<Course> = open(&dir, "course.csv");
    repo.add(Course::new("CS101", 3, "Intro", "")).unwrap();
    repo.add(Course::new("CS102", 3, "Data", "")).unwrap();

    let removed = repo.delete("CS101").unwrap();

    assert_eq!(removed.course_id, "CS101");
    assert_eq!(keys(&repo), vec!["CS102"]);
    assert_eq!(keys(&open::<Course>(&dir, "course.csv")), vec!["CS102"]);
}

#[test]
fn test_delete_last_record_leaves_header() {
    let (_temp, dir) = setup_temp_dir();
    let mut repo: Repository<Course> = open(&dir, "course.csv");
    repo.add(Course::new("CS101", 3, "Intro", "")).unwrap();

    repo.delete("CS101").unwrap();

    assert!(repo.is_empty());
    assert_eq!(
        fs::read_to_string(repo.path()).unwrap(),
        "course_id,credits,course_name,course_desc\n"
    );
}

#[test]
fn test_delete_unknown_key_is_not_found() {
    let (_temp, dir) = setup_temp_dir();
    let mut repo: Repository<Course> = open(&dir, "course.csv");

    assert!(matches!(
        repo.delete("CS999"),
        Err(GradeError::NotFound { kind: "course", .. })
    ));
}

#[test]
fn test_get_unknown_key_is_not_found() {
    let (_temp, dir) = setup_temp_dir();
    let repo: Repository<User> = open(&dir, "login.csv");

    assert!(matches!(
        repo.get("nobody@x.com"),
        Err(GradeError::NotFound { .. })
    ));
    assert!(repo.find("nobody@x.com").is_none());
}

// =============================================================================
// Synchronization Tests
// =============================================================================

#[test]
fn test_mutation_picks_up_external_changes() {
    let (_temp, dir) = setup_temp_dir();
    let mut first: Repository<Grade> = open(&dir, "grades.csv");
    let mut second: Repository<Grade> = open(&dir, "grades.csv");

    first.add(Grade::new("A", "A", "90-100")).unwrap();
    second.reload().unwrap();
    second.add(Grade::new("B", "B", "80-89")).unwrap();

    // first still holds its own index until it mutates or reloads
    assert_eq!(keys(&first), vec!["A"]);
    first.reload().unwrap();
    assert_eq!(keys(&first), vec!["A", "B"]);
}

#[test]
fn test_many_sequential_inserts() {
    let (_temp, dir) = setup_temp_dir();
    let mut repo: Repository<Student> = open(&dir, "student.csv");

    for i in 0..100 {
        repo.add(Student::new(
            format!("First{}", i),
            format!("Last{}", i),
            format!("test_student{}@school.com", i),
        ))
        .unwrap();
    }
    assert_eq!(repo.len(), 100);

    for i in 0..100 {
        repo.delete(&format!("test_student{}@school.com", i)).unwrap();
    }
    assert!(repo.is_empty());
    assert!(open::<Student>(&dir, "student.csv").is_empty());
}

// =============================================================================
// Search Tests
// =============================================================================

#[test]
fn test_search_matches_any_field_in_order() {
    let (_temp, dir) = setup_temp_dir();
    let mut repo: Repository<Student> = open(&dir, "student.csv");

    let mut enrolled = Student::new("Ada", "Lovelace", "a@x.com");
    enrolled.add_course("CS101").unwrap();
    repo.add(Student::new("Alan", "Turing", "turing@x.com")).unwrap();
    repo.add(enrolled).unwrap();

    let by_course: Vec<&str> = repo.search("CS101").iter().map(|s| s.key()).collect();
    assert_eq!(by_course, vec!["a@x.com"]);

    let by_email: Vec<&str> = repo.search("@x.com").iter().map(|s| s.key()).collect();
    assert_eq!(by_email, vec!["turing@x.com", "a@x.com"]);

    assert_eq!(repo.search("Lovelace").len(), 1);
    assert!(repo.search("lovelace").is_empty());
    assert!(repo.search("nomatch").is_empty());
}

#[test]
fn test_search_matches_grades_and_marks() {
    let (_temp, dir) = setup_temp_dir();
    let mut repo: Repository<Student> = open(&dir, "student.csv");

    let mut student = Student::new("Ada", "Lovelace", "a@x.com");
    student.add_course("CS101").unwrap();
    student.assign_grade("CS101", "A", "97").unwrap();
    repo.add(student).unwrap();

    assert_eq!(repo.search("97").len(), 1);
}

#[test]
fn test_search_users_by_role() {
    let (_temp, dir) = setup_temp_dir();
    let mut repo: Repository<User> = open(&dir, "login.csv");

    repo.add(User::with_password("a@x.com", "pw", Role::Student)).unwrap();
    repo.add(User::with_password("p@x.com", "pw", Role::Professor)).unwrap();

    let students: Vec<&str> = repo.search("student").iter().map(|u| u.key()).collect();
    assert_eq!(students, vec!["a@x.com"]);
    assert_eq!(repo.search("professor").len(), 1);
}

// =============================================================================
// Write Validation Tests
// =============================================================================

#[test]
fn test_add_blank_key_leaves_table_untouched() {
    let (_temp, dir) = setup_temp_dir();
    let mut repo: Repository<User> = open(&dir, "login.csv");
    repo.add(User::with_password("a@x.com", "pw", Role::Student)).unwrap();
    let before = fs::read_to_string(repo.path()).unwrap();

    let result = repo.add(User::with_password("", "pw", Role::Student));

    assert!(matches!(result, Err(GradeError::InvalidValue(_))));
    assert_eq!(fs::read_to_string(repo.path()).unwrap(), before);

    let reopened: Repository<User> = open(&dir, "login.csv");
    assert_eq!(keys(&reopened), vec!["a@x.com"]);
}

#[test]
fn test_update_with_half_graded_single_course_is_rejected() {
    let (_temp, dir) = setup_temp_dir();
    let mut repo: Repository<Student> = open(&dir, "student.csv");

    let mut student = Student::new("Ada", "Lovelace", "a@x.com");
    student.add_course("CS101").unwrap();
    repo.add(student.clone()).unwrap();

    // Blank grade next to real marks: "" would split to no grades at all
    let mut view = BTreeMap::new();
    view.insert("CS101".to_string(), GradeEntry::new("", "95"));
    student.ledger_mut().apply(&view);

    let result = repo.update(student);
    assert!(matches!(result, Err(GradeError::InvalidValue(_))));

    let reopened: Repository<Student> = open(&dir, "student.csv");
    let stored = reopened.get("a@x.com").unwrap();
    assert!(!stored.ledger().is_materialized());
    assert_eq!(stored.ledger().course_ids().collect::<Vec<_>>(), vec!["CS101"]);
}

#[test]
fn test_course_id_with_separator_is_never_written() {
    let (_temp, dir) = setup_temp_dir();
    let mut repo: Repository<Course> = open(&dir, "course.csv");

    let result = repo.add(Course::new("CS,101", 3, "Intro", ""));

    assert!(matches!(result, Err(GradeError::InvalidValue(_))));
    assert!(repo.is_empty());
    assert!(!repo.path().exists());
}

#[test]
fn test_separator_in_names_is_allowed() {
    let (_temp, dir) = setup_temp_dir();
    let mut repo: Repository<Course> = open(&dir, "course.csv");

    repo.add(Course::new("CS101", 3, "Intro, Part 1", "a, b")).unwrap();

    let reopened: Repository<Course> = open(&dir, "course.csv");
    assert_eq!(reopened.get("CS101").unwrap().course_name, "Intro, Part 1");
}

// =============================================================================
// Schema Tests
// =============================================================================

#[test]
fn test_load_missing_field_is_malformed() {
    let (_temp, dir) = setup_temp_dir();
    fs::write(dir.join("login.csv"), "user_id,password\na@x.com,abc\n").unwrap();

    let result = Repository::<User>::open(dir.join("login.csv"));

    assert!(matches!(result, Err(GradeError::MalformedRecord(_))));
}

#[test]
fn test_load_extra_field_is_malformed() {
    let (_temp, dir) = setup_temp_dir();
    fs::write(
        dir.join("grades.csv"),
        "grade_id,grade,marks_range,extra\nA,A,90-100,x\n",
    )
    .unwrap();

    let result = Repository::<Grade>::open(dir.join("grades.csv"));

    assert!(matches!(result, Err(GradeError::MalformedRecord(_))));
}

#[test]
fn test_load_desynchronized_ledger_is_malformed() {
    let (_temp, dir) = setup_temp_dir();
    fs::write(
        dir.join("student.csv"),
        "first_name,last_name,email_address,courses,grades,marks\nAda,L,a@x.com,\"CS101,CS102\",A,95\n",
    )
    .unwrap();

    let result = Repository::<Student>::open(dir.join("student.csv"));

    assert!(matches!(result, Err(GradeError::MalformedRecord(_))));
}

#[test]
fn test_load_bad_credits_and_role_are_malformed() {
    let (_temp, dir) = setup_temp_dir();
    fs::write(
        dir.join("course.csv"),
        "course_id,credits,course_name,course_desc\nCS101,three,Intro,\n",
    )
    .unwrap();
    fs::write(dir.join("login.csv"), "user_id,password,role\na@x.com,abc,admin\n").unwrap();

    assert!(matches!(
        Repository::<Course>::open(dir.join("course.csv")),
        Err(GradeError::MalformedRecord(_))
    ));
    assert!(matches!(
        Repository::<User>::open(dir.join("login.csv")),
        Err(GradeError::MalformedRecord(_))
    ));
}
