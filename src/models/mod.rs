pub mod application;
pub mod career;
pub mod degree;
pub mod department;
pub mod group;
pub mod student;
pub mod teacher;
pub mod thesis_proposal;
pub mod virtual_clock;
