use chrono::DateTime;

use mirrorscan_core::MirrorReport;

const GITHUB_USAGE: &str = r#"
### 📖 使用方法

将原始的 GitHub 文件链接前缀替换为镜像地址：

```bash
# 原始链接
https://github.com/user/repo/releases/download/v1.0/file.zip

# 加速链接
https://镜像地址/https://github.com/user/repo/releases/download/v1.0/file.zip
```

"#;

const DOCKER_USAGE: &str = r#"
### 📖 使用方法

配置 Docker 镜像加速器：

```bash
# 创建或编辑 /etc/docker/daemon.json
sudo mkdir -p /etc/docker
sudo tee /etc/docker/daemon.json <<-'EOF'
{
  "registry-mirrors": [
    "https://docker.m.daocloud.io",
    "https://registry.cn-hangzhou.aliyuncs.com"
  ]
}
EOF

# 重启 Docker 服务
sudo systemctl daemon-reload
sudo systemctl restart docker
```

"#;

const SOURCES_AND_NOTES: &str = r#"## 📝 数据来源

镜像地址来源于以下项目：

- [hunshcn/gh-proxy](https://github.com/hunshcn/gh-proxy)
- [XIU2/TrackersListCollection](https://github.com/XIU2/TrackersListCollection)
- [521xueweihan/GitHub520](https://github.com/521xueweihan/GitHub520)
- [dongyubin/DockerHub](https://github.com/dongyubin/DockerHub)

## 🔄 自动更新

本仓库通过定时任务自动更新镜像地址列表。

## ⚠️ 免责声明

- 本项目仅收集公开可用的镜像地址
- 请根据实际情况选择合适的镜像地址
- 使用镜像服务时请遵守相关服务条款
"#;

/// Render the human-readable README from a report.
///
/// Section order follows the JSON contents: stats, the verified GitHub
/// list with usage, the Docker list with daemon.json setup, then sources
/// and disclaimer.
pub fn render_readme(report: &MirrorReport) -> String {
    let time = format_update_time(&report.update_time);
    let mut out = String::with_capacity(4096);

    out.push_str("# 🚀 中国区 GitHub 和 Docker 加速镜像\n\n");
    out.push_str("本仓库自动收集和更新适用于中国区的 GitHub 文件加速和 Docker 镜像加速地址。\n\n");

    out.push_str("## 📊 统计信息\n\n");
    out.push_str(&format!("- **最后更新**: {}\n", time));
    out.push_str(&format!(
        "- **GitHub 镜像数量**: {}\n",
        report.github_mirrors.count
    ));
    out.push_str(&format!(
        "- **Docker 镜像数量**: {}\n\n",
        report.docker_mirrors.count
    ));

    out.push_str("## 🔥 GitHub 文件加速\n\n");
    out.push_str("以下是经过验证的 GitHub 文件加速镜像地址：\n\n");
    for mirror in &report.github_mirrors.urls {
        out.push_str(&format!("- {}\n", mirror));
    }
    out.push_str(GITHUB_USAGE);

    out.push_str("## 🐳 Docker 镜像加速\n\n");
    out.push_str("以下是收集到的 Docker 镜像加速地址：\n\n");
    for mirror in &report.docker_mirrors.urls {
        out.push_str(&format!("- {}\n", mirror));
    }
    out.push_str(DOCKER_USAGE);

    out.push_str(SOURCES_AND_NOTES);
    out.push_str(&format!("\n---\n\n**最后更新时间**: {}\n", time));

    out
}

fn format_update_time(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirrorscan_core::MirrorList;

    fn report() -> MirrorReport {
        MirrorReport {
            update_time: "2025-01-02T03:04:05+00:00".to_string(),
            github_mirrors: MirrorList {
                count: 1,
                urls: vec!["https://ghfast.top".to_string()],
            },
            docker_mirrors: MirrorList {
                count: 2,
                urls: vec![
                    "docker.m.daocloud.io".to_string(),
                    "registry.cn-hangzhou.aliyuncs.com".to_string(),
                ],
            },
        }
    }

    #[test]
    fn renders_lists_and_usage_sections() {
        let md = render_readme(&report());
        assert!(md.contains("- https://ghfast.top"));
        assert!(md.contains("- docker.m.daocloud.io"));
        assert!(md.contains("GitHub 镜像数量**: 1"));
        assert!(md.contains("Docker 镜像数量**: 2"));
        assert!(md.contains("daemon.json"));
        assert!(md.contains("免责声明"));
    }

    #[test]
    fn formats_rfc3339_update_time() {
        let md = render_readme(&report());
        assert!(md.contains("**最后更新**: 2025-01-02 03:04:05"));
    }

    #[test]
    fn unparseable_time_passes_through() {
        let mut r = report();
        r.update_time = "yesterday".to_string();
        let md = render_readme(&r);
        assert!(md.contains("**最后更新**: yesterday"));
    }
}
