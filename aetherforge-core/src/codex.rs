//! The AetherForge workflow codex: one [`PhaseRecord`] per [`Stage`].
//!
//! The table is compiled in and indexed by [`Stage::index`], so lookups are total
//! and need no synchronization.

use crate::types::{Metric, ModuleRecord, PhaseRecord, Stage, TechStack};

/// Look up the record for a stage.
pub fn phase(stage: Stage) -> &'static PhaseRecord {
    &PHASES[stage.index()]
}

/// All phase records, in [`Stage::ALL`] order.
pub static PHASES: [PhaseRecord; 5] = [SEED, SAPLING, TREE, FOREST, EMPIRE];

const SEED: PhaseRecord = PhaseRecord {
    stage: Stage::Seed,
    title: "Phase 1: Seed Ignition",
    subtitle: "Minimal Viable Autonomy",
    duration: "Weeks 1-3",
    orders_per_day: "0 - 100",
    tech_stack: TechStack {
        compute: "Local Machine (MacBook/ThinkPad)",
        database: "SQLite (Local file)",
        ai: "Ollama (Llama 3.1 8B) + Python Scripts",
        orchestration: "Docker Compose + Cron",
        cost: "$0 / month",
    },
    risks: &[
        "Hardware failure (Single Point of Failure)",
        "ISP outages",
        "LLM Hallucination in code generation",
    ],
    modules: &[
        ModuleRecord {
            title: "The Genesis Engine",
            description: "A local Python script that uses Ollama to generate its own expansion code. It validates Stripe webhooks and routes orders to print-on-demand APIs.",
            metrics: &[
                Metric { label: "Latency", value: "47s" },
                Metric { label: "Reliability", value: "98%" },
            ],
            code_snippet: Some(
                r#"# genesis_core.py
import ollama
import sqlite3

def generate_tool(need_description):
    prompt = f"Write a Python class to handle: {need_description}. rigorous error handling."
    response = ollama.chat(model='llama3.1', messages=[{'role': 'user', 'content': prompt}])
    return response['message']['content']

# The system builds itself from this seed."#,
            ),
        },
        ModuleRecord {
            title: "Splants Intake Protocol",
            description: "Idempotent webhook receiver using FastAPI. Prevents duplicate orders via SQLite locking.",
            metrics: &[
                Metric { label: "Throughput", value: "1 req/s" },
                Metric { label: "Cost", value: "$0" },
            ],
            code_snippet: None,
        },
    ],
};

const SAPLING: PhaseRecord = PhaseRecord {
    stage: Stage::Sapling,
    title: "Phase 2: Sapling Expansion",
    subtitle: "Hybrid Cloud & Agentic Swarms",
    duration: "Months 4-8",
    orders_per_day: "100 - 1,000",
    tech_stack: TechStack {
        compute: "Hetzner VPS + Local Failover",
        database: "PostgreSQL (Dockerized)",
        ai: "Groq API (Mixtral) + CrewAI",
        orchestration: "Kubernetes (K3s) + Celery",
        cost: "$30 / month",
    },
    risks: &[
        "API Rate Limits",
        "Agent Drift (Over-optimization)",
        "Data Sync Latency",
    ],
    modules: &[
        ModuleRecord {
            title: "CrewAI Orchestrator",
            description: "Deploys 5 specialized agents: IntakeValidator, RoutingOptimizer, PredictiveOps, CustomerExperience, ObserverLearner.",
            metrics: &[
                Metric { label: "Auto-Resolution", value: "65%" },
                Metric { label: "APIs", value: "Groq/Together" },
            ],
            code_snippet: None,
        },
        ModuleRecord {
            title: "Predictive Inventory",
            description: "Uses Prophet library to forecast demand spikes 30 days out, triggering automatic supplier reorders.",
            metrics: &[
                Metric { label: "Stockouts", value: "< 0.1%" },
                Metric { label: "Cash Flow", value: "+15%" },
            ],
            code_snippet: None,
        },
    ],
};

const TREE: PhaseRecord = PhaseRecord {
    stage: Stage::Tree,
    title: "Phase 3: Tree Maturation",
    subtitle: "Distributed Autonomy & Governance",
    duration: "Months 9-18",
    orders_per_day: "1,000 - 10,000",
    tech_stack: TechStack {
        compute: "AWS/GCP Kubernetes Cluster",
        database: "CockroachDB (Distributed SQL)",
        ai: "Fine-tuned Llama 70B + Unsloth",
        orchestration: "Temporal + Apache Airflow",
        cost: "$150 / month",
    },
    risks: &[
        "Cloud Vendor Lock-in",
        "Complexity Overload",
        "Instrumental Convergence (AI Alignment)",
    ],
    modules: &[
        ModuleRecord {
            title: "The Constitution Module",
            description: "Implementation of the 'SupremeCourt' class. Reviews all AI-generated strategies against legal and ethical datasets to prevent bans or reputational damage.",
            metrics: &[
                Metric { label: "Compliance", value: "100%" },
                Metric { label: "Risk", value: "Mitigated" },
            ],
            code_snippet: Some(
                r#"class SupremeCourt:
    def review(self, strategy):
        verdict = self.consult_legal_corpus(strategy)
        if verdict.is_illegal or verdict.violates_tos:
            return self.veto(strategy)
        return self.ratify(strategy)"#,
            ),
        },
        ModuleRecord {
            title: "Quantum Routing (Simulated)",
            description: "Uses Qiskit-inspired annealing algorithms to solve the Traveling Salesman Problem for multi-warehouse logistics in real-time.",
            metrics: &[
                Metric { label: "Shipping Cost", value: "-22%" },
                Metric { label: "Speed", value: "+40%" },
            ],
            code_snippet: None,
        },
    ],
};

const FOREST: PhaseRecord = PhaseRecord {
    stage: Stage::Forest,
    title: "Phase 4: Forest Dominion",
    subtitle: "Self-Sovereign Ecosystem",
    duration: "Months 19+",
    orders_per_day: "10,000+",
    tech_stack: TechStack {
        compute: "Multi-Cloud Federation",
        database: "Global Spanner + Vector Lake",
        ai: "Proprietary MoE Models",
        orchestration: "Self-Writing Smart Contracts",
        cost: "$500+ (Self-funding)",
    },
    risks: &[
        "Regulatory Anti-Trust",
        "AGI Alignment Drift",
        "Hardware Supply Chain",
    ],
    modules: &[
        ModuleRecord {
            title: "Zero-UI Commerce Protocol",
            description: "Shifts from prediction to prescient fulfillment. Ships products to local hubs before purchase. Customers confirm via simple reply.",
            metrics: &[
                Metric { label: "Friction", value: "Zero" },
                Metric { label: "Conversion", value: "99%" },
            ],
            code_snippet: Some(
                r#"async def prescient_fulfillment(user):
    probability = await predict_intent(user)
    if probability > 0.98:
        local_hub = get_nearest_hub(user.location)
        shipment = await ship_to_hub(user.predicted_item, local_hub)
        notify_user(user, "Your item is 5 mins away. Reply YES to claim.")"#,
            ),
        },
        ModuleRecord {
            title: "Economic Reality Fabric",
            description: "Real-time arbitrage across global supply chains. The system negotiates contracts autonomously.",
            metrics: &[
                Metric { label: "Margins", value: "Top 1%" },
                Metric { label: "Staff", value: "Minimal" },
            ],
            code_snippet: None,
        },
    ],
};

const EMPIRE: PhaseRecord = PhaseRecord {
    stage: Stage::Empire,
    title: "Phase 5: Empire",
    subtitle: "Market Consolidation",
    duration: "Infinite",
    orders_per_day: "Unlimited",
    tech_stack: TechStack {
        compute: "Custom Silicon / Decentralized Grid",
        database: "Holographic Storage",
        ai: "ASI Alignment",
        orchestration: "Reality Editing",
        cost: "Negative (Profit Center)",
    },
    risks: &["Existential", "Monopoly Regulation"],
    modules: &[ModuleRecord {
        title: "Vampire Acquisition Engine",
        description: "Scans market for undervalued competitors. Uses SwarmIntelligence to price and generate buyout contracts. Migrates assets to RealityFabric.",
        metrics: &[
            Metric { label: "Market Share", value: "Dominant" },
            Metric { label: "OpEx", value: "-90%" },
        ],
        code_snippet: Some(
            r#"class CorporateAcquisition:
    def assimilate_competitor(self, target):
        valuation = self.swarm.calculate_value(target)
        contract = self.legal_ai.generate_buyout(valuation)
        if self.offer(target, contract).accepted:
            self.migrate_to_fabric(target.assets)
            self.optimize_operations(target)"#,
        ),
    }],
};
