use crate::model::{Chapter, Progress, Subject, TestResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusCoverage {
    pub overall: i64,
    pub physics: i64,
    pub chemistry: i64,
    pub math: i64,
}

/// Percentage of chapters (in a subject, or overall) whose progress for
/// `user_id` is Completed or Revision. A chapter with no progress row
/// reads as Not Started. Empty partitions are 0, not a division error.
pub fn syllabus_coverage(
    chapters: &[Chapter],
    progress: &[Progress],
    user_id: &str,
) -> SyllabusCoverage {
    let part = |filter: Option<Subject>| -> i64 {
        let relevant = chapters
            .iter()
            .filter(|c| filter.map_or(true, |s| c.subject == s));
        let mut total = 0usize;
        let mut covered = 0usize;
        for ch in relevant {
            total += 1;
            let is_covered = progress
                .iter()
                .find(|p| p.user_id == user_id && p.chapter_id == ch.id)
                .map_or(false, |p| p.status.is_covered());
            if is_covered {
                covered += 1;
            }
        }
        percent(covered, total)
    };

    SyllabusCoverage {
        overall: part(None),
        physics: part(Some(Subject::Physics)),
        chemistry: part(Some(Subject::Chemistry)),
        math: part(Some(Subject::Math)),
    }
}

fn percent(covered: usize, total: usize) -> i64 {
    if total == 0 {
        return 0;
    }
    (100.0 * covered as f64 / total as f64).round() as i64
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    pub test_count: usize,
    pub average_score: i64,
    pub best_score: i64,
    pub total_score: i64,
}

/// Dashboard headline numbers over the mock-test history. `total_score`
/// is taken from the latest test (all fixtures share 300).
pub fn test_summary(results: &[TestResult]) -> TestSummary {
    let test_count = results.len();
    let average_score = if test_count == 0 {
        0
    } else {
        let sum: i64 = results.iter().map(|t| t.score).sum();
        (sum as f64 / test_count as f64).round() as i64
    };
    let best_score = results.iter().map(|t| t.score).max().unwrap_or(0);
    let total_score = results.last().map(|t| t.total_score).unwrap_or(0);

    TestSummary {
        test_count,
        average_score,
        best_score,
        total_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChapterStatus;
    use crate::seed;

    fn prog(user: &str, chapter: &str, status: ChapterStatus) -> Progress {
        Progress {
            user_id: user.into(),
            chapter_id: chapter.into(),
            status,
            last_updated: "2024-01-01T00:00:00Z".into(),
            completion_percentage: 0,
        }
    }

    #[test]
    fn empty_chapter_list_is_zero_everywhere() {
        let cov = syllabus_coverage(&[], &[prog("s1", "p1", ChapterStatus::Completed)], "s1");
        assert_eq!(
            cov,
            SyllabusCoverage {
                overall: 0,
                physics: 0,
                chemistry: 0,
                math: 0
            }
        );
    }

    #[test]
    fn completed_and_revision_count_as_covered() {
        let chapters = seed::syllabus();
        let progress = vec![
            prog("s1", "p1", ChapterStatus::Completed),
            prog("s1", "p2", ChapterStatus::Revision),
            prog("s1", "p3", ChapterStatus::InProgress),
            prog("s1", "c1", ChapterStatus::Completed),
        ];
        let cov = syllabus_coverage(&chapters, &progress, "s1");
        // 2 of 7 physics, 1 of 6 chemistry, 0 of 6 math, 3 of 19 overall.
        assert_eq!(cov.physics, 29);
        assert_eq!(cov.chemistry, 17);
        assert_eq!(cov.math, 0);
        assert_eq!(cov.overall, 16);
    }

    #[test]
    fn coverage_is_scoped_to_the_requested_user() {
        let chapters = seed::syllabus();
        let progress = vec![prog("s1", "p1", ChapterStatus::Completed)];
        assert_eq!(syllabus_coverage(&chapters, &progress, "s1").physics, 14);
        assert_eq!(syllabus_coverage(&chapters, &progress, "s2").physics, 0);
    }

    #[test]
    fn missing_progress_rows_read_as_not_started() {
        let chapters = seed::syllabus();
        let cov = syllabus_coverage(&chapters, &[], "s1");
        assert_eq!(cov.overall, 0);
    }

    #[test]
    fn rounding_is_nearest_integer() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 2), 50);
        assert_eq!(percent(0, 5), 0);
        assert_eq!(percent(5, 5), 100);
    }

    #[test]
    fn test_summary_over_fixtures() {
        let summary = test_summary(&seed::mock_test_results());
        assert_eq!(summary.test_count, 3);
        assert_eq!(summary.average_score, 195); // (180 + 210 + 195) / 3
        assert_eq!(summary.best_score, 210);
        assert_eq!(summary.total_score, 300);
    }

    #[test]
    fn test_summary_of_nothing_is_zero() {
        let summary = test_summary(&[]);
        assert_eq!(summary.test_count, 0);
        assert_eq!(summary.average_score, 0);
        assert_eq!(summary.best_score, 0);
    }
}
