//! IBM LoadLeveler.
//!
//! Directives use the `# @ key = value` comment convention and the block
//! must end with a bare `# @ queue`.

use super::{BatchSystem, job_file_stem, merge_user_directives};
use crate::job::TaskJob;
use indexmap::IndexMap;

const DIRECTIVE_PREFIX: &str = "# @ ";

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadLeveler;

impl BatchSystem for LoadLeveler {
    fn name(&self) -> &'static str {
        "loadleveler"
    }

    fn vacation_signal(&self) -> Option<&'static str> {
        Some("USR1")
    }

    fn format_directives(&self, job: &TaskJob) -> Vec<String> {
        let stem = job_file_stem(job);
        let mut directives = IndexMap::new();
        directives.insert(
            "job_name".to_string(),
            format!("{}.{}", job.suite_name, job.task_id),
        );
        directives.insert("output".to_string(), format!("{}.out", stem));
        directives.insert("error".to_string(), format!("{}.err", stem));
        if let Some(secs) = job.execution_time_limit.as_ref().and_then(|l| l.seconds()) {
            // Hard limit a minute after the soft limit.
            directives.insert(
                "wall_clock_limit".to_string(),
                format!("{},{}", secs + 60, secs),
            );
        }

        let mut lines: Vec<String> = merge_user_directives(directives, job)
            .into_iter()
            .map(|(key, value)| {
                if value.is_empty() {
                    format!("{}{}", DIRECTIVE_PREFIX, key)
                } else {
                    format!("{}{} = {}", DIRECTIVE_PREFIX, key, value)
                }
            })
            .collect();
        lines.push(format!("{}queue", DIRECTIVE_PREFIX));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::ExecutionTimeLimit;
    use indexmap::indexmap;

    fn job() -> TaskJob {
        TaskJob {
            batch_system_name: Some("loadleveler".to_string()),
            suite_name: "farm_noises".to_string(),
            task_id: "baa".to_string(),
            job_file_path: "directory/job".to_string(),
            execution_time_limit: Some(60u64.into()),
            directives: indexmap! {
                "moo".to_string() => "foo".to_string(),
                "cluck".to_string() => "bar".to_string(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_format_directives() {
        assert_eq!(
            LoadLeveler.format_directives(&job()),
            vec![
                "# @ job_name = farm_noises.baa",
                "# @ output = directory/job.out",
                "# @ error = directory/job.err",
                "# @ wall_clock_limit = 120,60",
                "# @ moo = foo",
                "# @ cluck = bar",
                "# @ queue",
            ]
        );
    }

    #[test]
    fn test_no_time_limit_no_wall_clock() {
        let mut job = job();
        job.execution_time_limit = None;
        job.directives.clear();
        assert_eq!(
            LoadLeveler.format_directives(&job),
            vec![
                "# @ job_name = farm_noises.baa",
                "# @ output = directory/job.out",
                "# @ error = directory/job.err",
                "# @ queue",
            ]
        );
    }

    #[test]
    fn test_user_wall_clock_limit_wins() {
        let mut job = job();
        job.directives.clear();
        job.directives
            .insert("wall_clock_limit".to_string(), "3:00:00".to_string());
        job.directives.insert("restart".to_string(), String::new());

        let lines = LoadLeveler.format_directives(&job);
        assert_eq!(lines[3], "# @ wall_clock_limit = 3:00:00");
        assert_eq!(lines[4], "# @ restart");
        assert_eq!(lines.last().map(String::as_str), Some("# @ queue"));
    }

    #[test]
    fn test_huge_time_limit_no_wall_clock() {
        let mut job = TaskJob::from_yaml(
            "suite_name: farm_noises\ntask_id: baa\nbatch_system_name: loadleveler\n\
             execution_time_limit: 1e300\n",
        )
        .unwrap();
        job.job_file_path = "directory/job".to_string();

        assert_eq!(
            LoadLeveler.format_directives(&job),
            vec![
                "# @ job_name = farm_noises.baa",
                "# @ output = directory/job.out",
                "# @ error = directory/job.err",
                "# @ queue",
            ]
        );
    }

    #[test]
    fn test_largest_time_limit_does_not_overflow() {
        let mut job = job();
        job.directives.clear();
        job.execution_time_limit = Some(ExecutionTimeLimit::MAX_SECONDS.into());

        let lines = LoadLeveler.format_directives(&job);
        assert_eq!(lines[3], "# @ wall_clock_limit = 4294967355,4294967295");
    }

    #[test]
    fn test_vacation_signal() {
        assert_eq!(LoadLeveler.vacation_signal(), Some("USR1"));
    }
}
