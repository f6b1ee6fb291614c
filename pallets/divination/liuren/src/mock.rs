//! # 测试环境配置
//!
//! 本模块提供大六壬起课 pallet 的测试环境。

use crate as pallet_liuren_chart;
use frame_support::{derive_impl, parameter_types};
use sp_runtime::BuildStorage;

type Block = frame_system::mocking::MockBlock<Test>;

// 构建测试运行时
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        LiuRen: pallet_liuren_chart,
    }
);

/// 系统配置
#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Block = Block;
}

parameter_types! {
    /// 每日最大起课次数
    pub const MaxDailyCharts: u32 = 3;
}

/// 大六壬配置
impl pallet_liuren_chart::Config for Test {
    type CalendarSource = crate::calendar::SolarApproximation;
    type MaxDailyCharts = MaxDailyCharts;
    type WeightInfo = ();
}

/// 测试账户
pub const ALICE: u64 = 1;
pub const BOB: u64 = 2;

/// 一天的区块数
pub const BLOCKS_PER_DAY: u64 = 14400;

/// 构建测试环境
pub fn new_test_ext() -> sp_io::TestExternalities {
    let t = frame_system::GenesisConfig::<Test>::default()
        .build_storage()
        .unwrap();

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| System::set_block_number(1));
    ext
}

/// 推进区块
pub fn run_to_block(n: u64) {
    while System::block_number() < n {
        System::set_block_number(System::block_number() + 1);
    }
}
