// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod curriculum;
pub mod offering;
pub mod period;
pub mod program;
pub mod repository_factory;
pub mod subject;

use std::sync::Arc;

pub use curriculum::{CurriculumService, StandardCurriculumService};
pub use offering::{OfferingService, StandardOfferingService};
pub use period::{PeriodService, StandardPeriodService};
pub use program::{ProgramService, StandardProgramService};
pub use repository_factory::{create_repositories, CatalogRepositories};
pub use subject::{StandardSubjectService, SubjectService};

/// The full set of catalog use cases, wired over one repository set
#[derive(Clone)]
pub struct CatalogServices {
    pub subjects: Arc<dyn SubjectService>,
    pub programs: Arc<dyn ProgramService>,
    pub periods: Arc<dyn PeriodService>,
    pub curriculum: Arc<dyn CurriculumService>,
    pub offerings: Arc<dyn OfferingService>,
}

impl CatalogServices {
    pub fn new(repos: &CatalogRepositories) -> Self {
        Self {
            subjects: Arc::new(StandardSubjectService::new(repos.subjects.clone())),
            programs: Arc::new(StandardProgramService::new(repos.programs.clone())),
            periods: Arc::new(StandardPeriodService::new(repos.periods.clone())),
            curriculum: Arc::new(StandardCurriculumService::new(
                repos.curriculum.clone(),
                repos.programs.clone(),
                repos.subjects.clone(),
            )),
            offerings: Arc::new(StandardOfferingService::new(
                repos.offerings.clone(),
                repos.subjects.clone(),
                repos.programs.clone(),
                repos.periods.clone(),
            )),
        }
    }
}
