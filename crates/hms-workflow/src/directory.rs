//! 科室专长目录
//!
//! 以医院名称为根的科室树，每个节点记录所属医生及其简介

use serde::{Deserialize, Serialize};

/// 一级科室
const SEED_DEPARTMENTS: &[&str] = &["Emergency", "Internal Medicine", "Surgery"];

/// 下级专科 (上级科室, 专科)
const SEED_SUBSPECIALTIES: &[(&str, &str)] = &[
    ("Internal Medicine", "Cardiology"),
    ("Internal Medicine", "Dermatology"),
    ("Internal Medicine", "Pediatrics"),
    ("Surgery", "Orthopedics"),
    ("Cardiology", "Electrophysiology"),
    ("Orthopedics", "Sports Medicine"),
    ("Emergency", "Trauma"),
];

/// 医生排班 (科室, 医生, 简介)
const SEED_DOCTORS: &[(&str, &str, &str)] = &[
    ("Emergency", "Dr. Ramon Cruz", "Specializes in immediate care and triage management."),
    ("Emergency", "Dra. Sofia Reyes", "Lead physician for non-critical emergency cases."),
    ("Trauma", "Dr. Paolo Ocampo", "Expert in severe physical injury and complex trauma protocols."),
    ("Trauma", "Dra. Lea Perez", "Focuses on stabilization and surgical planning for acute trauma."),
    ("Internal Medicine", "Dr. Antonio Dizon", "General internal medicine and chronic disease management."),
    ("Internal Medicine", "Dra. Maria Santos", "Focuses on diagnostic challenges and long-term adult care."),
    ("Cardiology", "Dr. Jose Garcia", "Non-invasive cardiology and heart disease prevention."),
    ("Electrophysiology", "Dra. Christine Lopez", "Specialist in heart rhythm disorders and pacemaker implantation."),
    ("Dermatology", "Dra. Elena Mendoza", "Expert in complex skin conditions and dermatological procedures."),
    ("Pediatrics", "Dra. Leila Gonzales", "Dedicated to pediatric primary care and infectious diseases in children."),
    ("Surgery", "Dr. Roberto Lim", "General surgeon with focus on abdominal and soft tissue procedures."),
    ("Orthopedics", "Dra. Carmen Ramos", "Specialist in joint replacement and geriatric orthopedic care."),
    ("Sports Medicine", "Dr. Miguel Dela Cruz", "Expert in musculoskeletal injuries and rehabilitation."),
];

/// 医生信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub name: String,
    pub description: String,
}

/// 科室节点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecializationNode {
    pub name: String,
    pub doctors: Vec<Doctor>, // 按加入顺序
    pub children: Vec<SpecializationNode>,
}

impl SpecializationNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            doctors: Vec::new(),
            children: Vec::new(),
        }
    }

    /// 按名称记录医生；同名医生覆盖简介，保留原位置
    fn upsert_doctor(&mut self, doctor_name: &str, description: &str) {
        match self.doctors.iter_mut().find(|d| d.name == doctor_name) {
            Some(doctor) => doctor.description = description.to_string(),
            None => self.doctors.push(Doctor {
                name: doctor_name.to_string(),
                description: description.to_string(),
            }),
        }
    }

    fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// 深度优先查找：先父后子，兄弟按插入顺序，首个不区分大小写的匹配胜出
    fn find(&self, name: &str) -> Option<&SpecializationNode> {
        if self.matches(name) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut SpecializationNode> {
        if self.matches(name) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(name))
    }

    fn collect_nodes<'a>(&'a self, out: &mut Vec<&'a SpecializationNode>) {
        out.push(self);
        for child in &self.children {
            child.collect_nodes(out);
        }
    }
}

/// 科室专长目录
#[derive(Debug, Clone)]
pub struct SpecializationDirectory {
    root: SpecializationNode,
}

impl SpecializationDirectory {
    /// 创建目录并执行固定的种子脚本
    pub fn new(hospital_name: &str) -> Self {
        let mut directory = Self::empty(hospital_name);
        directory.seed();
        directory
    }

    fn empty(hospital_name: &str) -> Self {
        Self {
            root: SpecializationNode::new(hospital_name),
        }
    }

    fn seed(&mut self) {
        let root_name = self.root.name.clone();

        for department in SEED_DEPARTMENTS {
            self.add_specialization(&root_name, department);
        }
        for (parent, child) in SEED_SUBSPECIALTIES {
            self.add_specialization(parent, child);
        }
        for (specialization, doctor, description) in SEED_DOCTORS {
            self.assign_doctor(specialization, doctor, description);
        }

        tracing::info!(
            "Seeded specialization directory for {} ({} departments)",
            root_name,
            self.nodes().len() - 1
        );
    }

    /// 在上级科室下添加专科；找不到上级时不做修改并返回 false
    pub fn add_specialization(&mut self, parent_name: &str, child_name: &str) -> bool {
        let duplicate = self.root.find(child_name).is_some();

        match self.root.find_mut(parent_name) {
            Some(parent) => {
                if duplicate {
                    tracing::warn!(
                        "Specialization {} already exists; lookups will resolve to the first match",
                        child_name
                    );
                }
                parent.children.push(SpecializationNode::new(child_name));
                tracing::debug!("Added specialization {} under {}", child_name, parent_name);
                true
            }
            None => {
                tracing::warn!("Parent specialization {} not found", parent_name);
                false
            }
        }
    }

    /// 为科室指定医生；同名医生后写覆盖
    pub fn assign_doctor(&mut self, specialization_name: &str, doctor_name: &str, description: &str) -> bool {
        match self.root.find_mut(specialization_name) {
            Some(node) => {
                node.upsert_doctor(doctor_name, description);
                tracing::debug!("Assigned {} to {}", doctor_name, specialization_name);
                true
            }
            None => {
                tracing::warn!("Specialization {} not found", specialization_name);
                false
            }
        }
    }

    /// 按名称查找科室
    pub fn find(&self, name: &str) -> Option<&SpecializationNode> {
        self.root.find(name)
    }

    pub fn root(&self) -> &SpecializationNode {
        &self.root
    }

    /// 深度优先顺序列出所有节点（含根）
    pub fn nodes(&self) -> Vec<&SpecializationNode> {
        let mut out = Vec::new();
        self.root.collect_nodes(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const HOSPITAL: &str = "City General Hospital";

    fn child_names(node: &SpecializationNode) -> Vec<&str> {
        node.children.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_seeded_hierarchy() {
        let directory = SpecializationDirectory::new(HOSPITAL);
        let root = directory.root();

        assert_eq!(root.name, HOSPITAL);
        assert_eq!(child_names(root), vec!["Emergency", "Internal Medicine", "Surgery"]);
        assert_eq!(
            child_names(directory.find("Internal Medicine").unwrap()),
            vec!["Cardiology", "Dermatology", "Pediatrics"]
        );
        assert_eq!(child_names(directory.find("Surgery").unwrap()), vec!["Orthopedics"]);
        assert_eq!(child_names(directory.find("Cardiology").unwrap()), vec!["Electrophysiology"]);
        assert_eq!(child_names(directory.find("Orthopedics").unwrap()), vec!["Sports Medicine"]);
        assert_eq!(child_names(directory.find("Emergency").unwrap()), vec!["Trauma"]);
    }

    #[test]
    fn test_seeded_staffing() {
        let directory = SpecializationDirectory::new(HOSPITAL);
        let emergency = directory.find("Emergency").unwrap();
        assert_eq!(
            emergency.doctors,
            vec![
                Doctor {
                    name: "Dr. Ramon Cruz".to_string(),
                    description: "Specializes in immediate care and triage management.".to_string(),
                },
                Doctor {
                    name: "Dra. Sofia Reyes".to_string(),
                    description: "Lead physician for non-critical emergency cases.".to_string(),
                },
            ]
        );
        assert!(directory.root().doctors.is_empty());
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let directory = SpecializationDirectory::new(HOSPITAL);
        assert_eq!(directory.find("sports medicine").unwrap().name, "Sports Medicine");
        assert_eq!(directory.find("CITY GENERAL HOSPITAL").unwrap().name, HOSPITAL);
        assert!(directory.find("Neurology").is_none());
    }

    #[test]
    fn test_add_specialization() {
        let mut directory = SpecializationDirectory::new(HOSPITAL);
        assert!(directory.add_specialization("Cardiology", "Interventional Cardiology"));
        assert!(directory.find("Interventional Cardiology").is_some());
        assert_eq!(
            child_names(directory.find("Cardiology").unwrap()),
            vec!["Electrophysiology", "Interventional Cardiology"]
        );

        let before = directory.nodes().len();
        assert!(!directory.add_specialization("NoSuchDept", "X"));
        assert_eq!(directory.nodes().len(), before);
        assert!(directory.find("X").is_none());
    }

    #[test]
    fn test_assign_doctor_last_write_wins() {
        let mut directory = SpecializationDirectory::new(HOSPITAL);
        assert!(directory.assign_doctor("cardiology", "Dr. Jose Garcia", "Updated description."));
        let cardiology = directory.find("Cardiology").unwrap();
        assert_eq!(cardiology.doctors.len(), 1);
        assert_eq!(cardiology.doctors[0].description, "Updated description.");

        assert!(!directory.assign_doctor("Neurology", "Dr. Nobody", "n/a"));
    }

    #[test]
    fn test_duplicate_names_resolve_to_first_match() {
        let mut directory = SpecializationDirectory::new(HOSPITAL);
        // Emergency 子树先于 Surgery 被访问
        assert!(directory.add_specialization("Surgery", "Trauma"));
        assert!(directory.assign_doctor("Trauma", "Dr. New", "Added later."));

        let emergency_trauma = &directory.find("Emergency").unwrap().children[0];
        assert!(emergency_trauma.doctors.iter().any(|d| d.name == "Dr. New"));
        let surgery_trauma = &directory.find("Surgery").unwrap().children[1];
        assert!(surgery_trauma.doctors.is_empty());
    }

    #[test]
    fn test_duplicate_name_under_missing_parent_is_ignored() {
        let mut directory = SpecializationDirectory::new(HOSPITAL);
        let before = directory.nodes().len();

        assert!(!directory.add_specialization("NoSuchDept", "Trauma"));
        assert_eq!(directory.nodes().len(), before);
        let trauma: Vec<_> = directory.nodes().into_iter().filter(|n| n.name == "Trauma").collect();
        assert_eq!(trauma.len(), 1);
        assert_eq!(trauma[0].doctors[0].name, "Dr. Paolo Ocampo");
    }

    #[test]
    fn test_serialized_tree_contains_each_seed_once() {
        let directory = SpecializationDirectory::new(HOSPITAL);
        let tree = serde_json::to_value(directory.root()).unwrap();

        fn walk(node: &Value, departments: &mut Vec<String>, doctors: &mut Vec<(String, String)>) {
            departments.push(node["name"].as_str().unwrap().to_string());
            for doctor in node["doctors"].as_array().unwrap() {
                doctors.push((
                    node["name"].as_str().unwrap().to_string(),
                    doctor["name"].as_str().unwrap().to_string(),
                ));
            }
            for child in node["children"].as_array().unwrap() {
                walk(child, departments, doctors);
            }
        }

        let mut departments = Vec::new();
        let mut doctors = Vec::new();
        walk(&tree, &mut departments, &mut doctors);

        assert_eq!(
            departments,
            vec![
                HOSPITAL,
                "Emergency",
                "Trauma",
                "Internal Medicine",
                "Cardiology",
                "Electrophysiology",
                "Dermatology",
                "Pediatrics",
                "Surgery",
                "Orthopedics",
                "Sports Medicine",
            ]
        );

        assert_eq!(doctors.len(), SEED_DOCTORS.len());
        for (specialization, doctor, _) in SEED_DOCTORS {
            let count = doctors
                .iter()
                .filter(|(s, d)| s == specialization && d == doctor)
                .count();
            assert_eq!(count, 1, "{} in {}", doctor, specialization);
        }
    }
}
