use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stream {
    Science,
    Commerce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: String,
    pub name: String,
    pub grade: u8,
    pub section: String,
    pub stream: Option<Stream>,
    pub teacher_id: String,
    pub teacher: String,
    pub subjects: Vec<String>,
    pub capacity: u32,
    pub schedule: String,
    pub fee_type: FeeType,
    pub monthly_fee: u32,
    pub yearly_fee: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamType {
    WeeklyTest,
    UnitTest,
    MidTerm,
    FinalExam,
    ClassTest,
}

impl ExamType {
    pub const ALL: [ExamType; 5] = [
        ExamType::WeeklyTest,
        ExamType::UnitTest,
        ExamType::MidTerm,
        ExamType::FinalExam,
        ExamType::ClassTest,
    ];

    /// Occurrences per year.
    pub fn occurrences(self) -> u32 {
        match self {
            ExamType::WeeklyTest => 40,
            ExamType::UnitTest => 12,
            ExamType::MidTerm => 2,
            ExamType::FinalExam => 1,
            ExamType::ClassTest => 24,
        }
    }

    pub fn total_marks(self) -> u32 {
        match self {
            ExamType::WeeklyTest => 25,
            ExamType::UnitTest => 50,
            ExamType::MidTerm => 100,
            ExamType::FinalExam => 100,
            ExamType::ClassTest => 20,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExamType::WeeklyTest => "Weekly Test",
            ExamType::UnitTest => "Unit Test",
            ExamType::MidTerm => "Mid-Term Exam",
            ExamType::FinalExam => "Final Exam",
            ExamType::ClassTest => "Class Test",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRecord {
    pub id: String,
    pub exam_name: String,
    pub exam_type: ExamType,
    pub subject: String,
    pub date: String,
    pub marks_obtained: u32,
    pub total_marks: u32,
    pub percentage: f64,
    pub grade: String,
    pub rank: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Submitted,
    Pending,
    Overdue,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub due_date: String,
    pub status: AssignmentStatus,
    pub marks: Option<u32>,
    pub max_marks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub date: String,
    pub subject: String,
    pub time_slot: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub total_classes: u32,
    pub attended: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Late,
    Pending,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: String,
    pub date: String,
    pub month: String,
    pub amount: u32,
    pub mode: String,
    pub transaction_id: Option<String>,
    pub receipt_no: Option<String>,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeStatus {
    Paid,
    Partial,
    Pending,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSnapshot {
    pub fee_type: FeeType,
    pub monthly_fee: u32,
    pub yearly_fee: u32,
    pub total_fee: u32,
    pub paid_amount: u32,
    pub due_amount: u32,
    pub status: FeeStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectScore {
    pub subject: String,
    pub average: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub roll_no: u32,
    pub first_name: String,
    pub last_name: String,
    pub name: String,
    pub gender: Gender,
    pub date_of_birth: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub parent_name: String,
    pub parent_phone: String,
    pub admission_date: String,
    pub batch_id: String,
    pub batch: String,
    pub grade: u8,
    pub fee: FeeSnapshot,
    pub attendance: AttendanceSummary,
    pub attendance_records: Vec<AttendanceRecord>,
    pub exam_records: Vec<ExamRecord>,
    pub assignments: Vec<Assignment>,
    pub payment_history: Vec<PaymentRecord>,
    pub overall_score: f64,
    pub subject_scores: Vec<SubjectScore>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub rank: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TeacherStatus {
    Active,
    OnLeave,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subjects: Vec<String>,
    pub qualification: String,
    pub experience_years: u32,
    pub salary: u32,
    pub join_date: String,
    pub batches: Vec<String>,
    pub status: TeacherStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledExam {
    pub id: String,
    pub title: String,
    pub exam_type: ExamType,
    pub batch_id: String,
    pub batch: String,
    pub subject: String,
    pub date: String,
    pub start_time: String,
    pub duration_minutes: u32,
    pub total_marks: u32,
    pub room: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherActivity {
    pub teacher_id: String,
    pub teacher: String,
    pub batch_count: usize,
    pub student_count: usize,
    pub classes_this_week: u32,
    pub assignments_graded: u32,
    pub avg_student_score: f64,
    pub attendance_marked: f64,
    pub last_active: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAnalytics {
    pub batch_id: String,
    pub batch: String,
    pub student_count: usize,
    pub capacity: u32,
    pub average_attendance: f64,
    pub average_marks: f64,
    pub top_performers: Vec<String>,
    pub pass_percentage: f64,
    pub improvement: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentLibraryEntry {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub batch_id: String,
    pub batch: String,
    pub created_by: String,
    pub due_date: String,
    pub max_marks: u32,
    pub total_students: usize,
    pub submissions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    Pdf,
    Video,
    Notes,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialLibraryEntry {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub grades: Vec<u8>,
    pub kind: MaterialKind,
    pub size_kb: u32,
    pub downloads: u32,
    pub uploaded_on: String,
}
