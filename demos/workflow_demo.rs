//! 分诊工作流演示程序
//!
//! 展示登记、分诊出队、治疗记录与撤销、医生指派以及科室树查询

use hms_core::HmsError;
use hms_workflow::{HospitalManagementSystem, HospitalOptions, SpecializationNode};

fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt::init();

    let mut hms = HospitalManagementSystem::new(HospitalOptions::default());

    println!("🏥 {} 分诊工作流演示\n", hms.hospital_name());

    // 1. 登记新患者
    let carol = hms.register_patient("Carol", "Migraine")?;
    println!("✅ 登记患者 Carol，标识 {}", carol);
    print_queue(&hms);

    // 2. 无当前患者时的操作会被拒绝
    match hms.add_treatment_step("Administered medication") {
        Err(HmsError::NotPermitted(msg)) => println!("⛔ {}", msg),
        other => println!("意外结果: {:?}", other),
    }

    // 3. 依次治疗，直到轮到 Carol
    while let Some(patient_id) = hms.treat_next_patient() {
        println!("📋 开始治疗 {}", patient_id);
        if patient_id == carol {
            break;
        }
    }

    // 4. 记录治疗步骤并撤销
    hms.add_treatment_step("Administered medication")?;
    hms.add_treatment_step("Ordered CT scan")?;
    hms.assign_doctor_to_current("Dra. Maria Santos")?;
    if let Some(step) = hms.undo_last_treatment()? {
        println!("↩️  撤销: {}", step.detail);
    }

    let record = hms.patient_record(&carol)?;
    println!("\n📄 患者记录:\n{}", serde_json::to_string_pretty(&record)?);

    // 5. 科室树
    println!("\n🌳 科室目录:");
    print_tree(&hms.specialization_tree().tree_data, 0);

    Ok(())
}

fn print_queue(hms: &HospitalManagementSystem) {
    let snapshot = hms.status_snapshot();
    println!("   候诊人数: {}", snapshot.queue_size);
    for entry in snapshot.queue_data {
        println!("   - {} {} ({})", entry.id, entry.name, entry.condition);
    }
}

fn print_tree(node: &SpecializationNode, depth: usize) {
    let indent = "  ".repeat(depth);
    println!("{}{}", indent, node.name);
    for doctor in &node.doctors {
        println!("{}  · {}: {}", indent, doctor.name, doctor.description);
    }
    for child in &node.children {
        print_tree(child, depth + 1);
    }
}
