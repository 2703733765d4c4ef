use crate::model::{Chapter, Subject, TestResult, User, UserRole};
use std::collections::BTreeMap;

/// Demo identities used when no remote backend is configured. The parent
/// is linked to the demo student; login falls back to these per role.
pub fn demo_users() -> Vec<User> {
    vec![
        User {
            id: "s1".into(),
            name: "Rahul Sharma".into(),
            email: "rahul@example.com".into(),
            role: UserRole::Student,
            avatar_url: None,
            linked_student_id: None,
        },
        User {
            id: "p1".into(),
            name: "Mr. Sharma".into(),
            email: "parent@example.com".into(),
            role: UserRole::Parent,
            avatar_url: None,
            linked_student_id: Some("s1".into()),
        },
        User {
            id: "a1".into(),
            name: "System Admin".into(),
            email: "admin@jeetracker.com".into(),
            role: UserRole::Admin,
            avatar_url: None,
            linked_student_id: None,
        },
    ]
}

pub fn syllabus() -> Vec<Chapter> {
    fn ch(id: &str, subject: Subject, name: &str, total_topics: i64) -> Chapter {
        Chapter {
            id: id.into(),
            subject,
            name: name.into(),
            total_topics,
        }
    }

    vec![
        ch("p1", Subject::Physics, "Kinematics", 5),
        ch("p2", Subject::Physics, "Laws of Motion", 4),
        ch("p3", Subject::Physics, "Work, Energy and Power", 3),
        ch("p4", Subject::Physics, "Rotational Motion", 6),
        ch("p5", Subject::Physics, "Thermodynamics", 4),
        ch("p6", Subject::Physics, "Electrostatics", 5),
        ch("p7", Subject::Physics, "Optics", 7),
        ch("c1", Subject::Chemistry, "Atomic Structure", 4),
        ch("c2", Subject::Chemistry, "Chemical Bonding", 6),
        ch("c3", Subject::Chemistry, "Thermodynamics (Chem)", 3),
        ch("c4", Subject::Chemistry, "Equilibrium", 5),
        ch("c5", Subject::Chemistry, "Organic Chemistry - Basic Principles", 8),
        ch("c6", Subject::Chemistry, "Hydrocarbons", 5),
        ch("m1", Subject::Math, "Sets, Relations and Functions", 3),
        ch("m2", Subject::Math, "Complex Numbers", 4),
        ch("m3", Subject::Math, "Quadratic Equations", 3),
        ch("m4", Subject::Math, "Sequences and Series", 4),
        ch("m5", Subject::Math, "Calculus - Limits & Continuity", 5),
        ch("m6", Subject::Math, "Coordinate Geometry", 7),
    ]
}

/// Historical mock-test records. Read-only: there is no create or update
/// operation for test results anywhere in the system.
pub fn mock_test_results() -> Vec<TestResult> {
    fn breakdown(physics: i64, chemistry: i64, math: i64) -> BTreeMap<Subject, i64> {
        BTreeMap::from([
            (Subject::Physics, physics),
            (Subject::Chemistry, chemistry),
            (Subject::Math, math),
        ])
    }

    vec![
        TestResult {
            id: "t1".into(),
            test_name: "Mock Test 1 - Full Syllabus".into(),
            date: "2023-10-15".into(),
            score: 180,
            total_score: 300,
            subject_breakdown: breakdown(60, 70, 50),
        },
        TestResult {
            id: "t2".into(),
            test_name: "Mock Test 2 - Mechanics Special".into(),
            date: "2023-11-02".into(),
            score: 210,
            total_score: 300,
            subject_breakdown: breakdown(80, 70, 60),
        },
        TestResult {
            id: "t3".into(),
            test_name: "Mock Test 3 - Full Syllabus".into(),
            date: "2023-11-20".into(),
            score: 195,
            total_score: 300,
            subject_breakdown: breakdown(65, 65, 65),
        },
    ]
}
