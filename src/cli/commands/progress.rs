//! Progress command handler

use super::load_state;
use course_scope::config::Config;
use course_scope::eligibility::CodeSet;
use course_scope::models::Course;
use course_scope::progress::{CourseStatus, MajorRequirements, RequirementProgress};
use course_scope::warn;
use std::path::{Path, PathBuf};

struct Sets {
    completed: CodeSet,
    in_progress: CodeSet,
    planned: CodeSet,
}

impl Sets {
    fn status(&self, code: &str) -> CourseStatus {
        CourseStatus::of(code, &self.completed, &self.in_progress, &self.planned)
    }
}

const fn mark(status: CourseStatus) -> &'static str {
    match status {
        CourseStatus::Completed => "x",
        CourseStatus::InProgress => "~",
        CourseStatus::Planned => "+",
        CourseStatus::Pending => " ",
    }
}

fn print_course(course: &Course, status: CourseStatus) {
    println!("  [{}] {}  {}  ({status})", mark(status), course.code, course.title);
    if status.shows_prerequisites() && course.has_prerequisites() {
        println!("        Prerequisites: {}", course.format_prerequisites());
    }
}

/// Run the progress command
pub fn run(config: &Config, requirements: Option<&Path>) -> Result<(), String> {
    let path = match requirements {
        Some(path) => path.to_path_buf(),
        None if !config.data.requirements.is_empty() => PathBuf::from(&config.data.requirements),
        None => return Err("No requirements file configured".to_string()),
    };
    let reqs = MajorRequirements::load(&path)
        .map_err(|e| format!("Failed to load {}: {e}", path.display()))?;
    let state = load_state(config)?;

    if let Some(major) = &state.selected_major {
        if major.id != reqs.major.id {
            warn!("Requirements are for {}, but {major} is selected", reqs.major);
        }
    }

    let sets = Sets {
        completed: state.completed(),
        in_progress: state.in_progress(),
        planned: state.planned(),
    };

    println!("\n=== {} ===\n", reqs.major);
    println!("Required Courses");
    for req in &reqs.required_courses {
        print_course(&req.course, sets.status(&req.course.code));
    }

    for (section, electives) in reqs.electives_by_section() {
        println!("\n{section}");
        for elective in electives {
            print_course(&elective.course, sets.status(&elective.course.code));
        }
    }

    let progress =
        RequirementProgress::compute(reqs.required_codes(), &sets.completed, &sets.planned);
    println!("\nProgress: {progress}");
    Ok(())
}
