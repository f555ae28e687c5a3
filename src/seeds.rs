use mirrorscan_core::MirrorKind;

// Known GitHub file acceleration proxies. These are revalidated on every
// run together with whatever the source crawl finds.
pub const GITHUB_SEEDS: &[&str] = &[
    "https://gh-proxy.com",
    "https://ghfast.top",
    "https://hub.gitmirror.com",
    "https://github.moeyy.xyz",
    "https://gh.ddlc.top",
    "https://gh.xmly.dev",
    "https://ghps.cc",
    "https://git.886.be",
    "https://github.abskoop.workers.dev",
    "https://ghproxy.net",
    "https://gh.con.sh",
    "https://cors.isteed.cc",
    "https://ghproxy.fsou.cc",
    "https://ghproxy.1888866.xyz",
    "https://fastgit.org",
];

// Known Docker registry mirrors, including the regional aliyuncs endpoints.
pub const DOCKER_SEEDS: &[&str] = &[
    "https://docker.hpcloud.cloud",
    "https://docker.m.daocloud.io",
    "https://docker.unsee.tech",
    "https://docker.1panel.live",
    "http://mirrors.ustc.edu.cn",
    "https://docker.chenby.cn",
    "http://mirror.azure.cn",
    "https://dockerpull.org",
    "https://dockerhub.icu",
    "https://hub.rat.dev",
    "https://registry.cn-hangzhou.aliyuncs.com",
    "https://registry.cn-shanghai.aliyuncs.com",
    "https://registry.cn-beijing.aliyuncs.com",
    "https://registry.cn-shenzhen.aliyuncs.com",
    "https://registry.cn-qingdao.aliyuncs.com",
    "https://registry.cn-zhangjiakou.aliyuncs.com",
    "https://ccr.ccs.tencentyun.com",
    "https://hub-mirror.c.163.com",
    "https://mirror.baidubce.com",
    "https://registry.docker-cn.com",
    "https://docker.mirrors.ustc.edu.cn",
    "https://reg-mirror.qiniu.com",
];

pub fn known_mirrors(kind: MirrorKind) -> &'static [&'static str] {
    match kind {
        MirrorKind::GithubProxy => GITHUB_SEEDS,
        MirrorKind::DockerRegistry => DOCKER_SEEDS,
    }
}
