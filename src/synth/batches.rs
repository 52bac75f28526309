use super::catalog::subjects_for;
use super::model::{Batch, FeeType, Stream};
use super::teachers::teacher_name;

struct BatchSpec {
    id: &'static str,
    grade: u8,
    section: &'static str,
    stream: Option<Stream>,
    teacher_id: &'static str,
    capacity: u32,
    schedule: &'static str,
    fee_type: FeeType,
    monthly_fee: u32,
}

#[rustfmt::skip]
const BATCH_TABLE: [BatchSpec; 15] = [
    BatchSpec { id: "b1", grade: 6, section: "A", stream: None, teacher_id: "t1", capacity: 25, schedule: "Mon, Wed, Fri - 3:00 PM to 4:30 PM", fee_type: FeeType::Monthly, monthly_fee: 2500 },
    BatchSpec { id: "b2", grade: 6, section: "B", stream: None, teacher_id: "t2", capacity: 25, schedule: "Tue, Thu, Sat - 3:00 PM to 4:30 PM", fee_type: FeeType::Monthly, monthly_fee: 2500 },
    BatchSpec { id: "b3", grade: 7, section: "A", stream: None, teacher_id: "t3", capacity: 25, schedule: "Mon, Wed, Fri - 4:30 PM to 6:00 PM", fee_type: FeeType::Monthly, monthly_fee: 2800 },
    BatchSpec { id: "b4", grade: 7, section: "B", stream: None, teacher_id: "t1", capacity: 25, schedule: "Tue, Thu, Sat - 4:30 PM to 6:00 PM", fee_type: FeeType::Yearly, monthly_fee: 2800 },
    BatchSpec { id: "b5", grade: 8, section: "A", stream: None, teacher_id: "t4", capacity: 25, schedule: "Mon, Wed, Fri - 3:00 PM to 4:30 PM", fee_type: FeeType::Monthly, monthly_fee: 3000 },
    BatchSpec { id: "b6", grade: 8, section: "B", stream: None, teacher_id: "t2", capacity: 25, schedule: "Tue, Thu, Sat - 3:00 PM to 4:30 PM", fee_type: FeeType::Monthly, monthly_fee: 3000 },
    BatchSpec { id: "b7", grade: 9, section: "A", stream: None, teacher_id: "t5", capacity: 30, schedule: "Mon to Fri - 5:00 PM to 6:30 PM", fee_type: FeeType::Monthly, monthly_fee: 3500 },
    BatchSpec { id: "b8", grade: 9, section: "B", stream: None, teacher_id: "t3", capacity: 25, schedule: "Mon to Fri - 6:30 PM to 8:00 PM", fee_type: FeeType::Yearly, monthly_fee: 3500 },
    BatchSpec { id: "b9", grade: 10, section: "A", stream: None, teacher_id: "t6", capacity: 30, schedule: "Mon to Sat - 4:00 PM to 6:00 PM", fee_type: FeeType::Monthly, monthly_fee: 4000 },
    BatchSpec { id: "b10", grade: 10, section: "B", stream: None, teacher_id: "t4", capacity: 25, schedule: "Mon to Sat - 6:00 PM to 8:00 PM", fee_type: FeeType::Monthly, monthly_fee: 4000 },
    BatchSpec { id: "b11", grade: 11, section: "A", stream: Some(Stream::Science), teacher_id: "t7", capacity: 30, schedule: "Mon to Sat - 7:00 AM to 9:00 AM", fee_type: FeeType::Monthly, monthly_fee: 5000 },
    BatchSpec { id: "b12", grade: 11, section: "B", stream: Some(Stream::Science), teacher_id: "t8", capacity: 20, schedule: "Mon to Sat - 5:00 PM to 7:00 PM", fee_type: FeeType::Yearly, monthly_fee: 5000 },
    BatchSpec { id: "b13", grade: 11, section: "C", stream: Some(Stream::Commerce), teacher_id: "t9", capacity: 25, schedule: "Mon to Sat - 4:00 PM to 6:00 PM", fee_type: FeeType::Monthly, monthly_fee: 4500 },
    BatchSpec { id: "b14", grade: 12, section: "A", stream: Some(Stream::Science), teacher_id: "t7", capacity: 20, schedule: "Mon to Sat - 9:00 AM to 11:00 AM", fee_type: FeeType::Monthly, monthly_fee: 5500 },
    BatchSpec { id: "b15", grade: 12, section: "B", stream: Some(Stream::Commerce), teacher_id: "t10", capacity: 20, schedule: "Mon to Sat - 11:00 AM to 1:00 PM", fee_type: FeeType::Yearly, monthly_fee: 5000 },
];

fn batch_name(grade: u8, section: &str, stream: Option<Stream>) -> String {
    match stream {
        None => format!("Grade {}-{}", grade, section),
        Some(Stream::Science) => format!("Grade {}-{} (Science)", grade, section),
        Some(Stream::Commerce) => format!("Grade {}-{} (Commerce)", grade, section),
    }
}

/// The fixed batch list, in display order.
pub fn generate_batches() -> Vec<Batch> {
    BATCH_TABLE
        .iter()
        .map(|b| Batch {
            id: b.id.to_string(),
            name: batch_name(b.grade, b.section, b.stream),
            grade: b.grade,
            section: b.section.to_string(),
            stream: b.stream,
            teacher_id: b.teacher_id.to_string(),
            teacher: teacher_name(b.teacher_id).unwrap_or_default().to_string(),
            subjects: subjects_for(b.grade, b.stream),
            capacity: b.capacity,
            schedule: b.schedule.to_string(),
            fee_type: b.fee_type,
            monthly_fee: b.monthly_fee,
            yearly_fee: b.monthly_fee * 11,
        })
        .collect()
}
