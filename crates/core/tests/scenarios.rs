//! Lettered end-to-end scenarios, driven through the textual instruction
//! loader against the reference `Config`.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tomasim_core::config::Config;
use tomasim_core::sim::loader;
use tomasim_core::Scheduler;

fn run_program(text: &str) -> (Scheduler, u64) {
    let config = Config::default();
    let program =
        loader::load_program(text.as_bytes(), config.arch_registers, config.register_init)
            .expect("well-formed program");
    let mut scheduler = Scheduler::new(program.instructions, program.registers, &config);
    let mut sink = Vec::new();
    let cycles = scheduler.run(&mut sink).expect("trace sink never fails on a Vec");
    (scheduler, cycles)
}

#[rstest]
#[case::scenario_a_independent_add("add F0 F1 F2\n", "F0", 2)]
#[case::scenario_b_raw_stall_second_instruction(
    "add F0 F1 F2\nadd F3 F0 F2\n",
    "F3",
    3
)]
fn lettered_scenario_reaches_expected_register_value(
    #[case] program: &str,
    #[case] register: &str,
    #[case] expected: i64,
) {
    let (scheduler, _cycles) = run_program(program);
    let reg_id = scheduler.registers().find(register).unwrap();
    assert_eq!(scheduler.registers().get(reg_id).value, expected);
}

#[test]
fn scenario_b_first_instruction_also_settles_at_two() {
    let (scheduler, _cycles) = run_program("add F0 F1 F2\nadd F3 F0 F2\n");
    let f0 = scheduler.registers().find("F0").unwrap();
    assert_eq!(scheduler.registers().get(f0).value, 2);
}

#[test]
fn scenario_c_waw_rename_splits_into_f0_and_r0() {
    let (scheduler, _cycles) = run_program("add F0 F1 F2\nadd F0 F1 F2\n");
    let f0 = scheduler.registers().find("F0").unwrap();
    let r0 = scheduler.registers().find("R0").unwrap();
    assert_eq!(scheduler.registers().get(f0).value, 2);
    assert_eq!(scheduler.registers().get(r0).value, 2);
    assert!(scheduler.busy_registers_reference_live_producers());
}

#[test]
fn scenario_d_memory_round_trip() {
    let (scheduler, _cycles) = run_program("sw F0 4 F1\nlw F2 4 F1\n");
    assert_eq!(scheduler.memory().load(5), 1);
    let f2 = scheduler.registers().find("F2").unwrap();
    assert_eq!(scheduler.registers().get(f2).value, 1);
}

#[test]
fn scenario_e_pool_saturation_completes_at_cycle_nine() {
    let (scheduler, cycles) =
        run_program("add F0 F1 F2\nadd F3 F4 F5\nadd F6 F7 F8\n");
    assert_eq!(cycles, 9);
    assert!(scheduler.is_done());
    assert!(scheduler.all_units_free());
}

#[test]
fn scenario_f_heavy_waw_chain_still_completes_within_rename_budget() {
    let mut text = String::new();
    for _ in 0..20 {
        text.push_str("add F0 F1 F2\n");
    }
    let (scheduler, _cycles) = run_program(&text);
    assert!(scheduler.is_done());
    assert!(scheduler.all_units_free());
    assert!(scheduler.busy_registers_reference_live_producers());
}

#[test]
fn zero_instruction_program_completes_in_one_cycle_with_no_state_change() {
    let config = Config::default();
    let (scheduler, cycles) = run_program("");
    assert_eq!(cycles, 1);
    for reg in scheduler.registers().iter() {
        assert_eq!(reg.value, config.register_init);
        assert!(!reg.is_busy());
    }
}
